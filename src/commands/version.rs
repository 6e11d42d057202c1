use anyhow::Result;

pub fn execute() -> Result<()> {
    println!("tunedl version {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
