/// List every part of a .pptx package with its classification.
///
/// This example demonstrates:
/// - Decoding a package from disk
/// - Iterating parts in archive order
/// - The slide reference and layout type queries
use pptx_parts::{Part, PackageReader, layout_type_index, max_slide_reference_ids};
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <path-to-pptx-file>", args[0]);
        eprintln!("Example: {} presentation.pptx", args[0]);
        std::process::exit(1);
    }

    let file_path = &args[1];
    println!("Opening package: {}", file_path);
    println!("{}", "=".repeat(80));

    let data = std::fs::read(file_path)?;
    let package = PackageReader::from_bytes(&data)?;

    println!("Parts ({}):", package.len());
    println!("{}", "-".repeat(80));
    for (path, part) in package.iter() {
        match part {
            Part::Markup(doc) => {
                println!(
                    "  [xml] {:<50} <{}> {} children",
                    path,
                    doc.root.name,
                    doc.root.children.len()
                );
            },
            Part::Binary(bytes) => {
                println!("  [bin] {:<50} {} bytes", path, bytes.len());
            },
        }
    }
    println!();

    let ids = max_slide_reference_ids(&package);
    println!("Slide references:");
    println!("{}", "-".repeat(80));
    println!("  Max slide id:  {}", ids.id);
    println!("  Max rId:       {}", ids.rid);
    println!();

    println!("Slide layouts:");
    println!("{}", "-".repeat(80));
    for (layout_type, path) in layout_type_index(&package) {
        println!("  {:<20} {}", layout_type, path);
    }

    Ok(())
}
