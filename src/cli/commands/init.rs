//! Init command handler

use crate::config::{ENV_PROJECT_ID, ENV_PUBLIC_KEY};
use crate::Config;

pub fn cmd_init() -> anyhow::Result<()> {
    if Config::create_default_if_missing()? {
        println!("✓ Created config.toml");
        println!();
        println!("The default config uses the bundled demo data.");
        println!(
            "To use the hosted record API, set mode = \"remote\" under [remote] or export {ENV_PROJECT_ID} and {ENV_PUBLIC_KEY}."
        );
    } else {
        println!("config.toml already exists; leaving it untouched.");
    }
    Ok(())
}
