use clap::Args;
use serde_json::{json, Value};

use benchgap_core::profiles;

/// Arguments for the demo profiles command
#[derive(Args)]
pub struct DemoArgs {
    /// Profile slug to run the estimator on (omit to list profiles)
    #[arg(long)]
    pub profile: Option<String>,
}

pub fn run_demo(args: DemoArgs) -> Result<Value, Box<dyn std::error::Error>> {
    match args.profile {
        Some(slug) => {
            let result = profiles::run_profile(&slug)?;
            Ok(serde_json::to_value(result)?)
        }
        None => {
            let roster: Vec<Value> = profiles::all_profiles()
                .into_iter()
                .map(|p| {
                    json!({
                        "slug": p.slug,
                        "name": p.name,
                        "segment": p.segment,
                    })
                })
                .collect();
            Ok(Value::Array(roster))
        }
    }
}
