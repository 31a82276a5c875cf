use std::collections::BTreeSet;

/// Categories the viewer has revealed in the current session.
///
/// Never persisted; a new session starts with nothing revealed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevealState {
    revealed: BTreeSet<String>,
}

impl RevealState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, category: &str) -> bool {
        self.revealed.contains(category)
    }

    /// Flip membership of `category`, returning whether it is now revealed
    pub fn toggle(&mut self, category: &str) -> bool {
        if self.revealed.remove(category) {
            false
        } else {
            self.revealed.insert(category.to_string());
            true
        }
    }

    /// Replace the whole set with `categories`
    pub fn replace<I, S>(&mut self, categories: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.revealed = categories.into_iter().map(Into::into).collect();
    }

    pub fn clear(&mut self) {
        self.revealed.clear();
    }

    pub fn len(&self) -> usize {
        self.revealed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.revealed.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_membership() {
        let mut state = RevealState::new();
        assert!(state.toggle("Smart Contract"));
        assert!(state.contains("Smart Contract"));
        assert!(!state.toggle("Smart Contract"));
        assert!(state.is_empty());
    }

    #[test]
    fn replace_discards_previous_members() {
        let mut state = RevealState::new();
        state.toggle("Oracle Dependency");
        state.replace(["Liquidity Pool", "Market Correlation"]);
        assert_eq!(state.len(), 2);
        assert!(!state.contains("Oracle Dependency"));
        assert_eq!(
            state.iter().collect::<Vec<_>>(),
            vec!["Liquidity Pool", "Market Correlation"]
        );
    }
}
