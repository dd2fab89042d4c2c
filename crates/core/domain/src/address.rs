//! 硬件地址格式校验（供 Web 等入口层使用，注册表本身不校验）。

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    Empty,
    Malformed(String),
}

impl std::fmt::Display for AddressError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "address required"),
            Self::Malformed(value) => write!(f, "malformed address: {}", value),
        }
    }
}

impl std::error::Error for AddressError {}

/// 校验 `XX:XX:XX:XX:XX:XX` 格式并转为大写规范形式。
pub fn normalize_address(input: &str) -> Result<String, AddressError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AddressError::Empty);
    }
    let octets: Vec<&str> = trimmed.split(':').collect();
    let well_formed = octets.len() == 6
        && octets
            .iter()
            .all(|octet| octet.len() == 2 && octet.chars().all(|c| c.is_ascii_hexdigit()));
    if !well_formed {
        return Err(AddressError::Malformed(trimmed.to_string()));
    }
    Ok(trimmed.to_ascii_uppercase())
}
