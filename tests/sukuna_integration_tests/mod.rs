use akakuro::sukuna::{
    self,
    parser::{Parser, ParserVagaba},
    Color, Sukuna,
};

use anyhow::{bail, Result};
use itertools::Itertools;
use pretty_assertions::assert_eq;

#[test]
fn only_insert_and_print() -> Result<()> {
    // Arrange
    let str = include_str!("./inputs/01.txt");
    let p = ParserVagaba::default();
    let mut tree: Sukuna<i32> = Sukuna::new();

    let stms = p.parse_lines(str)?;

    for stm in stms {
        match stm {
            sukuna::parser::Statement::Insert(value) => tree.insert(value),
            _ => bail!("Should not come here"),
        }
    }

    // Assert
    let pairs: Vec<(i32, Color)> = tree.iter().map(|(key, color)| (*key, color)).collect();
    let expected = vec![
        (10, Color::Black),
        (20, Color::Black),
        (30, Color::Black),
        (40, Color::Black),
        (50, Color::Black),
        (60, Color::Black),
        (70, Color::Black),
        (80, Color::Red),
        (90, Color::Black),
        (100, Color::Red),
    ];
    assert_eq!(expected, pairs);

    let root = tree.search(&40).expect("40 is the root key");
    assert_eq!(
        tree.node_info(root).to_string(),
        "[ 40(BLACK) P:NULL(BLACK) L:20(BLACK) R:60(BLACK) ]"
    );
    assert!(tree.is_valid());
    assert!(tree.height() <= 6);

    Ok(())
}

#[test]
fn statements_drive_searches_and_prints() -> Result<()> {
    // Arrange
    let str = include_str!("./inputs/02.txt");
    let p = ParserVagaba::default();
    let mut tree: Sukuna<i32> = Sukuna::new();
    let mut outputs: Vec<String> = Vec::new();

    // Act
    for stm in p.parse_lines(str)? {
        match stm {
            sukuna::parser::Statement::Insert(value) => tree.insert(value),
            sukuna::parser::Statement::Search(value) => match tree.search(&value) {
                Some(id) => outputs.push(tree.node_info(id).to_string()),
                None => outputs.push("NULO".to_string()),
            },
            sukuna::parser::Statement::Print => {
                outputs.push(
                    tree.iter()
                        .map(|(key, color)| format!("{key}({color})"))
                        .join(" "),
                );
            }
        }
    }

    // Assert
    let expected = vec![
        "[ 35(BLACK) P:20(RED) L:30(RED) R:37(RED) ]".to_string(),
        "NULO".to_string(),
        "10(BLACK) 20(RED) 30(RED) 35(BLACK) 37(RED) 40(BLACK) 70(BLACK)".to_string(),
    ];
    assert_eq!(expected, outputs);
    assert!(tree.is_valid());

    Ok(())
}
