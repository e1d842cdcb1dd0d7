use std::{
    collections::BTreeSet,
    io::{self, BufRead, Write},
};

use anyhow::Result;

use pyfix::{classify::UserInputMap, params::extract_parameters};

use super::OutputMode;
use crate::printer::print_json;

pub fn run(code: &str, mode: OutputMode) -> Result<()> {
    let names = extract_parameters(code);
    if mode.json {
        return print_json(&names);
    }
    for name in names {
        println!("{}", name);
    }
    Ok(())
}

/// Prompts on the terminal for one value per parameter. EOF leaves a value empty.
pub fn ask_for_inputs(names: &BTreeSet<String>) -> Result<UserInputMap> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut inputs = UserInputMap::new();
    for name in names {
        print!("Value for `{}`: ", name);
        io::stdout().flush().ok();
        let value = lines.next().transpose()?.unwrap_or_default();
        inputs.insert(name.clone(), value);
    }
    Ok(inputs)
}
