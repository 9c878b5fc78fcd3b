//! The `formcraft init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("formcraft.toml").exists() {
        println!("formcraft.toml already exists, skipping.");
    } else {
        std::fs::write("formcraft.toml", SAMPLE_CONFIG)?;
        println!("Created formcraft.toml");
    }

    std::fs::create_dir_all("forms")?;
    let example_path = std::path::Path::new("forms/example.json");
    if example_path.exists() {
        println!("forms/example.json already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_FORM)?;
        println!("Created forms/example.json");
    }

    println!("\nNext steps:");
    println!("  1. Run: formcraft check --file forms/example.json");
    println!("  2. Run: formcraft serve");
    println!("  3. Run: formcraft submit --file forms/example.json");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# formcraft configuration

[server]
host = "127.0.0.1"
port = 3000

[client]
base_url = "http://127.0.0.1:3000"
timeout_secs = 30
"#;

const EXAMPLE_FORM: &str = r#"{
  "formName": "Wellbeing check-in",
  "description": "A short monthly questionnaire",
  "questions": [
    {
      "title": "Housing",
      "questionText": "Select a number from the range that most closely relates to your situation",
      "questionType": "score",
      "scoreRanges": [
        { "title": "Unstable", "min": 0, "max": 3 },
        { "title": "Stable", "min": 4, "max": 10 }
      ],
      "required": true,
      "commentRequired": false
    },
    {
      "title": "Support",
      "questionText": "Which kinds of support did you use this month?",
      "questionType": "checkbox",
      "options": ["Peer group", "Counselling", "None"],
      "required": false,
      "commentRequired": true
    }
  ]
}
"#;
