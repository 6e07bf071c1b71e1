use std::{
    fs::File,
    io::{self, Read, Write},
    path::PathBuf,
};
const NOT_FOUND_KEYWORD: &str = "NULO";

use akakuro::sukuna::{
    cli::Cli,
    parser::{self, Parser as _, Statement},
    Color, NoopTracer, Side, Sukuna, Tracer,
};
use anyhow::Result;
use clap::Parser;
use itertools::Itertools;

fn read_from_stdin(buf: &mut String) -> Result<()> {
    let mut stdin = io::stdin();
    stdin.read_to_string(buf)?;

    Ok(())
}

fn read_from_file(buf: &mut String, path: PathBuf) -> Result<()> {
    let mut f = File::open(path)?;
    f.read_to_string(buf)?;

    Ok(())
}

/// Narrates repair steps on stderr, keeping stdout for results.
struct StderrTracer;

impl Tracer<i32> for StderrTracer {
    fn inserted(&self, key: &i32) {
        eprintln!("insert {key} done");
    }

    fn recolored(&self, key: &i32, color: Color) {
        eprintln!("recolor {key} -> {color}");
    }

    fn rotated(&self, side: Side, pivot: &i32) {
        match side {
            Side::Left => eprintln!("rotate left at {pivot}"),
            Side::Right => eprintln!("rotate right at {pivot}"),
        }
    }
}

fn process_statements<T: Tracer<i32>>(tracer: T, stms: Vec<Statement>) -> Result<String> {
    let mut tree: Sukuna<i32, T> = Sukuna::with_tracer(tracer);
    let mut str_list: Vec<String> = Vec::new();

    for stm in stms {
        match stm {
            parser::Statement::Insert(value) => {
                tree.insert(value);
            }
            parser::Statement::Search(value) => match tree.search(&value) {
                Some(id) => str_list.push(tree.node_info(id).to_string()),
                None => str_list.push(NOT_FOUND_KEYWORD.to_string()),
            },
            parser::Statement::Print => {
                let res = tree
                    .iter()
                    .map(|(key, color)| format!("{key}({color})"))
                    .join(" ");
                str_list.push(res);
            }
        }
    }

    let res = str_list.join("\n");

    Ok(res)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut buf = String::new();

    match cli.input {
        Some(path) => read_from_file(&mut buf, path)?,
        None => read_from_stdin(&mut buf)?,
    }

    let mut writer: Box<dyn Write> = match cli.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };

    let parser = parser::ParserVagaba::default();
    let stms = parser.parse_lines(&buf)?;

    let output_string = if cli.trace {
        process_statements(StderrTracer, stms)?
    } else {
        process_statements(NoopTracer, stms)?
    };

    writer.write_all(output_string.as_bytes())?;

    Ok(())
}
