//! Code tables compiled from `data/wood_classes.toml` by `build.rs`.

pub mod wood_class_data {
    include!(concat!(env!("OUT_DIR"), "/wood_class_data.rs"));
}
