//! Compiles `data/wood_classes.toml` into static lookup tables.
//!
//! The generated file is pulled in by `src/generated.rs`, so the engine never
//! parses TOML at runtime.

use std::collections::BTreeMap;
use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawClass {
    f_mk: Option<f64>,
    f_t0k: Option<f64>,
    f_t90k: Option<f64>,
    f_c0k: f64,
    f_c90k: Option<f64>,
    f_vk: f64,
    e_0_mean: f64,
    e_0_05: Option<f64>,
    e_90_mean: Option<f64>,
    g_mean: Option<f64>,
    density_k: Option<f64>,
    density_mean: f64,
}

#[derive(Debug, Deserialize)]
struct ClassFile {
    structural: BTreeMap<String, RawClass>,
    native: BTreeMap<String, RawClass>,
}

fn write_record(out: &mut String, origin: &str, code: &str, raw: &RawClass) {
    let _ = writeln!(
        out,
        "    ClassRecord {{ origin: {origin:?}, code: {code:?}, f_mk: {:?}, f_t0k: {:?}, f_t90k: {:?}, \
         f_c0k: {:?}, f_c90k: {:?}, f_vk: {:?}, e_0_mean: {:?}, e_0_05: {:?}, e_90_mean: {:?}, \
         g_mean: {:?}, density_k: {:?}, density_mean: {:?} }},",
        raw.f_mk,
        raw.f_t0k,
        raw.f_t90k,
        raw.f_c0k,
        raw.f_c90k,
        raw.f_vk,
        raw.e_0_mean,
        raw.e_0_05,
        raw.e_90_mean,
        raw.g_mean,
        raw.density_k,
        raw.density_mean,
    );
}

fn main() {
    let source = "data/wood_classes.toml";
    println!("cargo:rerun-if-changed={source}");

    let text = fs::read_to_string(source).unwrap_or_else(|e| panic!("reading {source}: {e}"));
    let classes: ClassFile = toml::from_str(&text).unwrap_or_else(|e| panic!("parsing {source}: {e}"));

    let mut out = String::new();
    out.push_str(
        "/// One row of the characteristic-value tables, as read from `data/wood_classes.toml`.\n\
         #[derive(Debug, Clone, Copy, PartialEq)]\n\
         pub struct ClassRecord {\n\
         \x20   pub origin: &'static str,\n\
         \x20   pub code: &'static str,\n\
         \x20   pub f_mk: Option<f64>,\n\
         \x20   pub f_t0k: Option<f64>,\n\
         \x20   pub f_t90k: Option<f64>,\n\
         \x20   pub f_c0k: f64,\n\
         \x20   pub f_c90k: Option<f64>,\n\
         \x20   pub f_vk: f64,\n\
         \x20   pub e_0_mean: f64,\n\
         \x20   pub e_0_05: Option<f64>,\n\
         \x20   pub e_90_mean: Option<f64>,\n\
         \x20   pub g_mean: Option<f64>,\n\
         \x20   pub density_k: Option<f64>,\n\
         \x20   pub density_mean: f64,\n\
         }\n\n",
    );

    out.push_str("pub static WOOD_CLASSES: &[ClassRecord] = &[\n");
    for (code, raw) in &classes.structural {
        write_record(&mut out, "structural", code, raw);
    }
    for (code, raw) in &classes.native {
        write_record(&mut out, "native", code, raw);
    }
    out.push_str("];\n");

    let out_dir = env::var("OUT_DIR").unwrap_or_else(|e| panic!("OUT_DIR not set: {e}"));
    let dest = Path::new(&out_dir).join("wood_class_data.rs");
    fs::write(&dest, out).unwrap_or_else(|e| panic!("writing {}: {e}", dest.display()));
}
