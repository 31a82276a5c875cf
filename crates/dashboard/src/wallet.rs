/// Wallet connection for one dashboard session.
///
/// The account identifier is opaque here; the wallet provider owns the
/// handshake.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletSession {
    account: Option<String>,
}

impl WalletSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a connected account. Blank identifiers are ignored.
    pub fn connect(&mut self, account: &str) -> bool {
        let account = account.trim();
        if account.is_empty() {
            return false;
        }
        tracing::info!("Wallet connected: {}", short_address(account));
        self.account = Some(account.to_string());
        true
    }

    pub fn disconnect(&mut self) {
        if let Some(account) = self.account.take() {
            tracing::info!("Wallet disconnected: {}", short_address(&account));
        }
    }

    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }

    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    /// `0x1234...abcd` form for headers and logs
    pub fn short_address(&self) -> Option<String> {
        self.account.as_deref().map(short_address)
    }
}

/// First six and last four characters of an address
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
