use anyhow::Context;
use aws_blocks::blocks::BUILTIN;

/// Prints the block catalogue, or a single entry when a block id is given.
fn main() -> anyhow::Result<()> {
    let output = match std::env::args().nth(1) {
        Some(id) => BUILTIN
            .get(&id)
            .with_context(|| format!("looking up block {id}"))?
            .definition()
            .catalogue_entry(),
        None => BUILTIN.catalogue(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
