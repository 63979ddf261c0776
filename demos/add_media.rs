/// Add a media file to a .pptx package and save the result.
///
/// Only the part is added; wiring it into a slide's relationships is left to
/// the caller.
use pptx_parts::Package;
use std::env;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        eprintln!("Usage: {} <input.pptx> <media-file> <output.pptx>", args[0]);
        eprintln!("Example: {} deck.pptx logo.png deck-with-logo.pptx", args[0]);
        std::process::exit(1);
    }

    let mut package = Package::open(&args[1])?;

    let media_path = Path::new(&args[2]);
    let file_name = media_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or("media path has no file name")?;
    let part_path = format!("ppt/media/{}", file_name);

    if package.contains(&part_path) {
        println!("Replacing existing part {}", part_path);
    }
    package.insert_binary(part_path.clone(), std::fs::read(media_path)?);

    package.save(&args[3])?;
    println!("✓ Wrote {} ({} parts) with {}", args[3], package.len(), part_path);

    Ok(())
}
