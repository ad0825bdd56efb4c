use indoc::indoc;
use std::env;
use std::fs;
use std::path::Path;
use std::time::UNIX_EPOCH;

const CATALOG_REL: &str = "assets/catalog.json";

fn main() {
    let manifest = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    let catalog_basename = Path::new(CATALOG_REL)
        .file_name()
        .and_then(|s| s.to_str())
        .expect("invalid catalog asset filename");
    let catalog_path = Path::new(&manifest).join(CATALOG_REL);
    println!("cargo:rerun-if-changed={}", catalog_path.display());

    let modified_unix = fs::metadata(&catalog_path)
        .and_then(|m| m.modified())
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs())
        .unwrap_or(0);

    // The bundled catalog is copied into OUT_DIR and referenced from a
    // generated source file so tracked sources are never rewritten.
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set");
    let gen_path = Path::new(&out_dir).join("generated_catalog.rs");
    let catalog_dest = Path::new(&out_dir).join(catalog_basename);
    fs::copy(&catalog_path, &catalog_dest).expect("failed to copy catalog.json to OUT_DIR");

    let gen_src = format!(
        indoc!(
            r#"
                pub struct BundledCatalog {{ pub content: &'static [u8], pub modified_unix: u64 }}

                pub const BUNDLED_CATALOG: BundledCatalog = BundledCatalog {{
                    content: include_bytes!(concat!(env!("OUT_DIR"), "/{basename}")),
                    modified_unix: {modified},
                }};
            "#
        ),
        basename = catalog_basename,
        modified = modified_unix,
    );
    fs::write(&gen_path, gen_src).expect("failed to write generated_catalog.rs to OUT_DIR");
}
