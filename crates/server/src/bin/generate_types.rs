//! Writes the TypeScript declarations of the API payloads.
//!
//! Usage: `generate_types [OUTPUT]`; prints to stdout when no path is given.

use ts_rs::TS;
use utils::{
    command::{CommandSummary, CommandUpdate},
    response::MessageResponse,
};

fn generate_types_content() -> String {
    let decls = [
        CommandSummary::decl(),
        CommandUpdate::decl(),
        MessageResponse::decl(),
    ];

    let mut out = String::from("// This file was generated by `generate_types`. Do not edit.\n\n");
    for decl in decls {
        out.push_str("export ");
        out.push_str(&decl);
        out.push_str("\n\n");
    }
    out
}

fn main() -> anyhow::Result<()> {
    let content = generate_types_content();
    match std::env::args().nth(1) {
        Some(path) => {
            std::fs::write(&path, content)?;
            eprintln!("wrote {path}");
        }
        None => print!("{content}"),
    }
    Ok(())
}
