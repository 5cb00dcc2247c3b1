use std::fs::File;
use std::io::{self, BufRead};

use tenpai_duel::{
    control::common::*,
    error,
    hand::{calc_discards_to_tenpai, is_winning_hand, waiting_tile_kinds},
    model::*,
    util::misc::*,
};

// [CalculatorApp]
// 手牌の表記から和了判定,待ち牌,聴牌となる打牌を表示
#[derive(Debug)]
pub struct CalculatorApp {
    args: Vec<String>,
}

impl CalculatorApp {
    pub fn new(args: Vec<String>) -> Self {
        Self { args }
    }

    pub fn run(&mut self) {
        let mut file_path = "".to_string();
        let mut exp = "".to_string();
        let mut it = self.args.iter();
        while let Some(s) = it.next() {
            match s.as_str() {
                "-f" => file_path = next_value(&mut it, s),
                _ => {
                    if s.starts_with('-') {
                        error!("unknown option: {}", s);
                        return;
                    }
                    if !exp.is_empty() {
                        error!("multiple expression is not allowed");
                        return;
                    }
                    exp = s.clone();
                }
            }
        }

        if file_path.is_empty() == exp.is_empty() {
            print_usage();
            return;
        }

        if !exp.is_empty() {
            if let Err(e) = process_expression(&exp) {
                error!("{}", e);
            }
            return;
        }

        if let Err(e) = run_from_file(&file_path) {
            error!("{}", e);
        }
    }
}

fn run_from_file(file_path: &str) -> Res {
    let file = File::open(file_path)?;
    let lines = io::BufReader::new(file).lines();
    for exp in lines.map_while(Result::ok) {
        let e = exp.replace(' ', "");
        if e.is_empty() || e.starts_with('#') {
            // 空行とコメント行はスキップ
            println!("> {}", exp);
        } else if let Err(e) = process_expression(&exp) {
            error!("{}", e);
        }
        println!();
    }
    Ok(())
}

fn process_expression(exp: &str) -> Res {
    println!("> {}", exp);
    let report = evaluate(exp)?;
    print!("{}", report);
    Ok(())
}

// 手牌の枚数によって表示内容を切り替え
// 3n+1枚: 待ち牌, 3n+2枚: 和了判定と聴牌となる打牌
fn evaluate(exp: &str) -> Res<String> {
    let exp = exp.split('#').next().unwrap_or("");
    let hand = table_from_string(exp)?;
    let total: usize = hand.iter().sum();
    let mut out = String::new();
    match total % 3 {
        1 => {
            let waits = waiting_tile_kinds(&hand);
            if waits.is_empty() {
                out += "not tenpai\n";
            } else {
                out += &format!("waits: {}\n", kinds_to_string(&waits));
            }
        }
        2 => {
            out += &format!("win: {}\n", is_winning_hand(&hand, total));
            for (k, waits) in calc_discards_to_tenpai(&hand) {
                out += &format!(
                    "discard {} => waits: {}\n",
                    kind_symbol(k),
                    kinds_to_string(&waits)
                );
            }
        }
        _ => Err(format!("invalid number of tiles: {}", total))?,
    }
    Ok(out)
}

fn print_usage() {
    error!(
        r"invalid input
Usage
    $ cargo run C EXPRESSION
    $ cargo run C -f FILE
Options
    -f: read expresisons from file instead of a commandline expression
"
    );
}

#[test]
fn test_calculator() {
    assert_eq!(evaluate("m1112345678999").unwrap(), "waits: m123456789\n");
    assert_eq!(evaluate("m147p258s369z1234").unwrap(), "not tenpai\n");
    let out = evaluate("m123456789p11z77z1 # shanpon").unwrap();
    assert!(out.starts_with("win: false\n"));
    assert!(out.contains("discard z1 => waits: p1z7\n"));
    assert!(evaluate("m123").is_err());
    assert!(evaluate("m11111").is_err());
}
