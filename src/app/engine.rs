use tenpai_duel::{
    actor::*,
    control::{engine::RoundEngine, game::Game},
    error, info,
    listener::*,
    model::*,
    util::misc::*,
};

// [App]
#[derive(Debug)]
pub struct EngineApp {
    seed: u64,
    rule: Rule,
    pause: f64,
    n_game: usize,
    write: bool,
    quiet: bool,
    verbose: bool,
    names: [String; SEAT], // actor names
}

impl EngineApp {
    pub fn new(args: Vec<String>) -> Self {
        let mut app = Self {
            seed: 0,
            rule: Rule::default(),
            pause: 1.0,
            n_game: 1,
            write: false,
            quiet: false,
            verbose: false,
            names: ["Manual".into(), "Random".into()],
        };

        let mut it = args.iter();
        while let Some(s) = it.next() {
            match s.as_str() {
                "-s" => app.seed = next_value(&mut it, s),
                "-g" => app.n_game = next_value(&mut it, s),
                "-p" => app.pause = next_value(&mut it, s),
                "-r-draws" => app.rule.max_draws = next_value(&mut it, s),
                "-r-init" => app.rule.initial_score = next_value(&mut it, s),
                "-c" => {
                    let path: String = next_value(&mut it, s);
                    app.rule = match load_rule(&path) {
                        Ok(r) => r,
                        Err(e) => error_exit(format!("{}: {}", path, e)),
                    };
                }
                "-w" => app.write = true,
                "-q" => app.quiet = true,
                "-v" => app.verbose = true,
                "-0" => app.names[0] = next_value(&mut it, s),
                "-1" => app.names[1] = next_value(&mut it, s),
                opt => {
                    error!("unknown option: {}", opt);
                    std::process::exit(0);
                }
            }
        }

        if app.seed == 0 {
            app.seed = unixtime_now();
            info!(
                "Random seed is not specified. Unix timestamp '{}' is used as seed.",
                app.seed
            );
        }
        if let Err(e) = app.rule.validate() {
            error_exit::<_, ()>(format!("invalid rule: {}", e));
        }

        app
    }

    pub fn run(self) {
        println!("seed: {}", self.seed);
        info!("rule: {:?}", self.rule);

        let mut actors = vec![];
        for name in &self.names {
            match create_actor(name) {
                Ok(a) => actors.push(a),
                Err(e) => error_exit(e),
            }
        }
        let actors: [Box<dyn Actor>; SEAT] = [actors[0].clone(), actors[1].clone()];
        for s in 0..SEAT {
            println!("actor{}: {:?}", s, actors[s]);
        }
        println!();

        // 手動操作のプレイヤーがいる場合は相手の手牌を隠す
        let viewer = actors.iter().position(|a| a.get_config().name == "Manual");
        let mut listeners: Vec<Box<dyn Listener>> = vec![];
        if !self.quiet {
            listeners.push(Box::new(EventPrinter::new(self.verbose, viewer)));
        }
        if self.write {
            listeners.push(Box::new(EventWriter::new("data")));
        }

        let delay: Box<dyn Delay> = if self.quiet {
            Box::new(NoDelay)
        } else {
            Box::new(Sleep { scale: self.pause })
        };

        let start = std::time::Instant::now();
        let engine = RoundEngine::new(self.seed, self.rule.clone(), listeners);
        let mut game = Game::new(engine, actors, delay);
        match game.run(self.n_game) {
            Ok(results) => print_summary(&results),
            Err(e) => error!("{}", e),
        }
        println!(
            "total elapsed time: {:8.3}sec",
            start.elapsed().as_nanos() as f32 / 1000000000.0
        );
    }
}

fn load_rule(path: &str) -> Res<Rule> {
    let s = std::fs::read_to_string(path)?;
    Ok(Rule::from_json(&s)?)
}

fn print_summary(results: &[RoundResult]) {
    let mut wins = [0; SEAT];
    let mut draws = 0;
    for r in results {
        match r.winner() {
            Some(s) => wins[s] += 1,
            None => draws += 1,
        }
    }
    for s in 0..SEAT {
        println!("ac{} wins: {}", s, wins[s]);
    }
    println!("exhaustive draws: {}", draws);
}
