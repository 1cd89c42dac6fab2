// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ucscene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Ucscene CLI entrypoint.
//!
//! `check` loads a diagram document and reports what could not be restored, `schema` prints
//! the document JSON Schema and `demo` writes a small example diagram.

use std::error::Error;

use ucscene::store::{DocumentFile, WriteDurability};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} check <file>\n  {program} schema\n  {program} demo <file> [--durable-writes]\n\ncheck exits with status 1 when records had to be dropped while loading.\n--durable-writes opts into slower, best-effort durable persistence (fsync/sync where supported)."
    );
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Check { path: String },
    Schema,
    Demo { path: String, durable_writes: bool },
}

fn parse_command(mut args: impl Iterator<Item = String>) -> Result<Command, ()> {
    let name = args.next().ok_or(())?;
    let mut path: Option<String> = None;
    let mut durable_writes = false;

    for arg in args {
        match arg.as_str() {
            "--durable-writes" => {
                if durable_writes {
                    return Err(());
                }
                durable_writes = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if path.is_some() {
                    return Err(());
                }
                path = Some(arg);
            }
        }
    }

    match name.as_str() {
        "check" if !durable_writes => Ok(Command::Check {
            path: path.ok_or(())?,
        }),
        "schema" if path.is_none() && !durable_writes => Ok(Command::Schema),
        "demo" => Ok(Command::Demo { path: path.ok_or(())?, durable_writes }),
        _ => Err(()),
    }
}

fn main() {
    let result = (|| -> Result<i32, Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "ucscene".to_owned());

        let command = match parse_command(args) {
            Ok(command) => command,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        match command {
            Command::Check { path } => {
                let restored = DocumentFile::new(&path).load()?;
                println!(
                    "{path}: {} nodes, {} edges",
                    restored.scene.nodes().len(),
                    restored.scene.edges().len()
                );
                for warning in &restored.warnings {
                    println!("warning: {warning}");
                }
                Ok(i32::from(!restored.warnings.is_empty()))
            }
            Command::Schema => {
                let schema = ucscene::format::document_schema();
                println!("{}", serde_json::to_string_pretty(&schema)?);
                Ok(0)
            }
            Command::Demo { path, durable_writes } => {
                let durability = if durable_writes {
                    WriteDurability::Durable
                } else {
                    WriteDurability::BestEffort
                };
                let document = ucscene::demo::demo_document()?;
                DocumentFile::new(&path).with_durability(durability).save(&document)?;
                println!("wrote {path}");
                Ok(0)
            }
        }
    })();

    match result {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("ucscene: {err}");
            std::process::exit(1);
        }
    }
}
