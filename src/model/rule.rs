use super::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rule {
    pub max_draws: usize,    // B_DRAWでの自摸回数の上限 (1以上)
    pub initial_score: Score, // 対戦開始時の持ち点
    pub guess_size: usize,   // 識破で指定する牌種の数 (1..=KIND)
}

impl Default for Rule {
    fn default() -> Self {
        Self {
            max_draws: 5,
            initial_score: 30000,
            guess_size: 2,
        }
    }
}

impl Rule {
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        let rule: Self = serde_json::from_str(s)?;
        rule.validate()
            .map_err(<serde_json::Error as serde::de::Error>::custom)?;
        Ok(rule)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_draws == 0 {
            return Err("max_draws must be at least 1".to_string());
        }
        if self.guess_size == 0 || self.guess_size > KIND {
            return Err(format!(
                "guess_size must be in 1..={}, got {}",
                KIND, self.guess_size
            ));
        }
        Ok(())
    }
}

#[test]
fn test_rule_partial_json() {
    let rule = Rule::from_json(r#"{"max_draws": 3}"#).unwrap();
    assert_eq!(rule.max_draws, 3);
    assert_eq!(rule.initial_score, 30000);
    assert_eq!(rule.guess_size, 2);
}

#[test]
fn test_rule_rejects_degenerate_values() {
    assert!(Rule::from_json(r#"{"guess_size": 0}"#).is_err());
    assert!(Rule::from_json(r#"{"guess_size": 35}"#).is_err());
    assert!(Rule::from_json(r#"{"max_draws": 0}"#).is_err());
    assert!(Rule::from_json(r#"{"guess_size": 34, "max_draws": 1}"#).is_ok());

    let rule = Rule {
        guess_size: 0,
        ..Rule::default()
    };
    assert!(rule.validate().is_err());
}
