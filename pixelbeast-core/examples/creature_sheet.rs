//! Renders one sprite per built-in archetype at every pixel size and prints its plan.
//!
//! `cargo run -p pixelbeast-core --example creature_sheet -- <out-dir>`

use pixelbeast::{PixelSize, RuleTable, compose_creature, encode_png, rasterize};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let out_dir = std::env::args()
        .nth(1)
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| std::path::PathBuf::from("target/creature_sheet"));
    std::fs::create_dir_all(&out_dir)?;

    let rules = RuleTable::default();
    let descriptions = [
        "round blue slime",
        "mechanical robot with horns",
        "scary ghost",
        "cute fire cat with wings",
        "giant crystal dragon",
    ];

    for (i, desc) in descriptions.iter().enumerate() {
        for size in PixelSize::ALL {
            let creature = compose_creature(desc, &rules, size.px())?;
            println!(
                "{desc} @ {size}: {:?} body, {:?} face, hue {}, appendages {:?}",
                creature.plan.archetype,
                creature.plan.face,
                creature.palette.hue,
                creature.plan.appendages
            );
            let img = rasterize(&creature.image, 512)?;
            let path = out_dir.join(format!("creature_{i}_{}.png", size.px()));
            std::fs::write(&path, encode_png(&img)?)?;
        }
    }

    Ok(())
}
