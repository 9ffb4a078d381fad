//! The `itemstat init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create itemstat.toml
    if std::path::Path::new("itemstat.toml").exists() {
        println!("itemstat.toml already exists, skipping.");
    } else {
        std::fs::write("itemstat.toml", SAMPLE_CONFIG)?;
        println!("Created itemstat.toml");
    }

    // Create example response file
    std::fs::create_dir_all("responses")?;
    let example_path = std::path::Path::new("responses/example.csv");
    if example_path.exists() {
        println!("responses/example.csv already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_RESPONSES)?;
        println!("Created responses/example.csv");
    }

    println!("\nNext steps:");
    println!("  1. Replace responses/example.csv with your exam export");
    println!("  2. Run: itemstat validate --input responses/example.csv");
    println!("  3. Run: itemstat analyze --input responses/example.csv --format all");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# itemstat configuration

output_dir = "./itemstat-results"
default_format = "table"
compare_threshold = 0.05
alpha_if_deleted = true

[bands.reliability]
excellent = 0.9
good = 0.8
acceptable = 0.7
questionable = 0.6

[bands.difficulty]
easy = 0.8
moderate = 0.4

[bands.discrimination]
excellent = 0.4
good = 0.3
fair = 0.2
"#;

const EXAMPLE_RESPONSES: &str = "\
Student,Q1,Q2,Q3,Q4,Q5
Ana,1,1,1,1,0
Ben,1,1,0,1,0
Chloe,1,0,0,0,0
Dev,1,1,1,1,1
Ema,0,1,0,0,0
Finn,1,1,1,0,1
Gwen,1,0,1,1,0
Hugo,0,0,0,0,0
";
