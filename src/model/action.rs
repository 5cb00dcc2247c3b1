use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    Nop, // Call: 鳴きのスキップ, SelfDrawWin: 和了の見逃し

    // Turn Actions
    Discard, // 打牌
    Declare, // 聴牌宣言 (宣言牌の打牌を伴う)

    // Call Actions
    Chi,
    Pon,
    Kan,

    // SelfDrawWin Actions
    Tsumo, // 自摸和了
}

// indexは手牌(ソート済み)における対象牌のindex (Discard, Declareのみ)
// waitsは宣言後の待ち牌種 (Declareのみ)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub action_type: ActionType,
    pub index: Option<Index>,
    pub waits: Vec<Kind>,
}

impl Action {
    #[inline]
    pub fn new(action_type: ActionType, index: Option<Index>, waits: Vec<Kind>) -> Self {
        Self {
            action_type,
            index,
            waits,
        }
    }

    #[inline]
    pub fn nop() -> Self {
        Self::new(ActionType::Nop, None, vec![])
    }

    #[inline]
    pub fn discard(index: Index) -> Self {
        Self::new(ActionType::Discard, Some(index), vec![])
    }

    #[inline]
    pub fn declare(index: Index, waits: Vec<Kind>) -> Self {
        Self::new(ActionType::Declare, Some(index), waits)
    }

    #[inline]
    pub fn call(meld_type: MeldType) -> Self {
        let action_type = match meld_type {
            MeldType::Chi => ActionType::Chi,
            MeldType::Pon => ActionType::Pon,
            MeldType::Kan => ActionType::Kan,
        };
        Self::new(action_type, None, vec![])
    }

    #[inline]
    pub fn tsumo() -> Self {
        Self::new(ActionType::Tsumo, None, vec![])
    }

    pub fn meld_type(&self) -> Option<MeldType> {
        match self.action_type {
            ActionType::Chi => Some(MeldType::Chi),
            ActionType::Pon => Some(MeldType::Pon),
            ActionType::Kan => Some(MeldType::Kan),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.action_type)?;
        if let Some(i) = self.index {
            write!(f, "({})", i)?;
        }
        if !self.waits.is_empty() {
            let ws: Vec<String> = self.waits.iter().map(|&k| kind_symbol(k)).collect();
            write!(f, "[{}]", ws.join(","))?;
        }
        Ok(())
    }
}
