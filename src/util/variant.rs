use std::fmt;

// Actorの引数の値
#[derive(Debug, Clone, PartialEq)]
pub enum Variant {
    Int(i64),
    Float(f64),
}

impl Variant {
    pub fn as_int(&self) -> Option<i64> {
        match *self {
            Self::Int(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match *self {
            Self::Float(v) => Some(v),
            Self::Int(v) => Some(v as f64),
        }
    }

    // 既定値と同じ型として文字列を解釈
    pub fn parse_as(&self, value: &str) -> Result<Variant, String> {
        Ok(match self {
            Self::Int(_) => Self::Int(value.parse::<i64>().map_err(|e| e.to_string())?),
            Self::Float(_) => Self::Float(value.parse::<f64>().map_err(|e| e.to_string())?),
        })
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Arg {
    pub name: String,
    pub value: Variant,
}

impl Arg {
    pub fn int(name: &str, value: i64) -> Self {
        Self {
            name: name.to_string(),
            value: Variant::Int(value),
        }
    }

    pub fn float(name: &str, value: f64) -> Self {
        Self {
            name: name.to_string(),
            value: Variant::Float(value),
        }
    }
}

#[test]
fn test_parse_as() {
    let v = Variant::Float(0.0);
    assert_eq!(v.parse_as("0.25"), Ok(Variant::Float(0.25)));
    assert!(Variant::Int(0).parse_as("x").is_err());
    assert_eq!(Variant::Int(0).parse_as("-3"), Ok(Variant::Int(-3)));
    assert_eq!(Variant::Float(0.5).as_int(), None);
}
