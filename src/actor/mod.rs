mod manual;
mod random;

use std::fmt;

use crate::model::*;
use crate::util::variant::*;

pub use manual::Manual;
pub use random::Random;

#[derive(Debug, Clone)]
pub struct Config {
    pub name: String,
    pub args: Vec<Arg>,
}

impl Config {
    // 引数の取得 (既定値で型が決まっているので存在しない場合はプログラムの誤り)
    pub fn arg(&self, name: &str) -> &Variant {
        match self.args.iter().find(|a| a.name == name) {
            Some(a) => &a.value,
            None => panic!("unknown arg: {}", name),
        }
    }
}

// Actor trait
// 局の進行はGameが行い,Actorは与えられた選択肢から操作を選ぶのみ
pub trait Actor: ActorClone + Send {
    // 局開始時の初期化処理 (seedは対局のseedから局,座席ごとに導出)
    fn init(&mut self, _seat: Seat, _seed: u64) {}

    // 可能なアクションの選択 (actsは空ではない)
    // 選択肢にないアクションを返した場合はエンジンに拒否され,再度呼び出される
    fn select_action(&mut self, stg: &RoundState, acts: &[Action]) -> Action;

    // 識破する牌種の選択 (n種類の異なる牌種)
    fn select_guess(&mut self, stg: &RoundState, n: usize) -> Vec<Kind>;

    // Actorの詳細表示用
    fn get_config(&self) -> &Config;
}

impl fmt::Debug for dyn Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let conf = self.get_config();
        let arg_str = conf
            .args
            .iter()
            .map(|a| format!("{}={}", a.name, a.value))
            .collect::<Vec<String>>()
            .join(",");
        write!(f, "{}({})", conf.name, arg_str)
    }
}

// https://stackoverflow.com/questions/30353462/how-to-clone-a-struct-storing-a-boxed-trait-object
pub trait ActorClone {
    fn clone_box(&self) -> Box<dyn Actor>;
}

impl<T> ActorClone for T
where
    T: 'static + Actor + Clone,
{
    fn clone_box(&self) -> Box<dyn Actor> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn Actor> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

trait ActorBuilder {
    fn get_default_config(&self) -> Config;
    fn create(&self, config: Config) -> Box<dyn Actor>;
}

// "Random(0.1,,3)" のような表記からActorを生成
// 空の引数は既定値のまま
pub fn create_actor(exp: &str) -> Result<Box<dyn Actor>, String> {
    let builders: Vec<Box<dyn ActorBuilder>> = vec![
        Box::new(random::RandomBuilder {}),
        Box::new(manual::ManualBuilder {}),
    ];

    let name: &str;
    let args: Vec<&str>;
    let paren_left = exp.find('(');
    let paren_right = exp.rfind(')');
    match (paren_left, paren_right) {
        (Some(l), Some(r)) => {
            if r < l {
                return Err(format!("invalid paren: {}", exp));
            }
            args = exp[l + 1..r].split(',').map(|a| a.trim()).collect();
            name = &exp[..l];
        }
        (None, None) => {
            args = vec![];
            name = exp;
        }
        _ => return Err(format!("invalid paren: {}", exp)),
    }

    for b in &builders {
        let mut conf = b.get_default_config();
        if name != conf.name {
            continue;
        }

        if conf.args.len() < args.len() {
            return Err(format!(
                "expected {} arguments for {}. but {} arguments are provided.",
                conf.args.len(),
                name,
                args.len(),
            ));
        }

        for (i, &a) in args.iter().enumerate() {
            if !a.is_empty() {
                conf.args[i].value = conf.args[i]
                    .value
                    .parse_as(a)
                    .map_err(|e| format!("{}: {}", e, a))?;
            }
        }

        return Ok(b.create(conf));
    }

    Err(format!("unknown actor name: {}", name))
}

#[test]
fn test_create_actor() {
    let a = create_actor("Random").unwrap();
    assert_eq!(a.get_config().name, "Random");
    assert_eq!(format!("{:?}", a), "Random(declare_rate=0.08,min_wall=10,seed=0)");

    let a = create_actor("Random(0.5,,7)").unwrap();
    let conf = a.get_config();
    assert_eq!(conf.arg("declare_rate"), &Variant::Float(0.5));
    assert_eq!(conf.arg("min_wall"), &Variant::Int(10));
    assert_eq!(conf.arg("seed"), &Variant::Int(7));

    assert!(create_actor("Manual").is_ok());
    assert!(create_actor("Unknown").is_err());
    assert!(create_actor("Random(1,2,3,4)").is_err());
    assert!(create_actor("Random(x)").is_err());
    assert!(create_actor("Random)0(").is_err());
}
