use std::env;
use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=README.md");

    let crate_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_default();
    let readme_path = Path::new(&crate_dir).join("README.md");
    let content = fs::read_to_string(readme_path).unwrap_or_default();

    // Transform for rustdoc:
    // 1. Strip 'src/' prefix from links so rustdoc can resolve modules
    // 2. Strip '.rs' extension so links go to modules, not files
    let rustdoc_content = content.replace("](src/", "](").replace(".rs)", ")");

    let out_dir = env::var("OUT_DIR").unwrap_or_default();
    let dest_path = Path::new(&out_dir).join("README_GENERATED.md");
    if let Err(e) = fs::write(dest_path, rustdoc_content) {
        println!("cargo:warning=webstatus-core: failed to write README: {e}");
    }
}
