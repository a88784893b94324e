//! Print the versions and master platforms of a local `index.json`.

use std::path::Path;

use zig_update_schema::ReleaseIndex;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let path = args.get(1).map_or("index.json", String::as_str);

    let bytes = std::fs::read(Path::new(path))?;
    let index = ReleaseIndex::from_slice(&bytes)?;

    let versions = index.versions();
    println!("Versions ({}):", versions.len());
    for v in &versions {
        println!(" - {v}");
    }

    let master = index.entry(zig_update_schema::MASTER)?;
    if let Some(version) = &master.version {
        println!("master is {version}");
    }
    for platform in master.platforms() {
        println!("  {platform}");
    }

    Ok(())
}
