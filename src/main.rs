#![warn(rust_2018_idioms)]
#![allow(clippy::needless_range_loop)]

mod app;

use tenpai_duel::error;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        error!("mode not specified");
        return;
    }

    let args2 = args[2..].to_vec();
    match args[1].as_str() {
        "C" => {
            // Calculator (待ち牌計算モード)
            app::CalculatorApp::new(args2).run();
        }
        "E" => {
            // Engine (対戦モード)
            app::EngineApp::new(args2).run();
        }
        m => {
            error!("unknown mode: {}", m)
        }
    }
}
