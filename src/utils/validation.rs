use crate::utils::error::{GameRemoverError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(GameRemoverError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(GameRemoverError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(GameRemoverError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(GameRemoverError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(GameRemoverError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Steam ID 必須是非零的 64 位元整數
pub fn validate_steam_id(field_name: &str, value: &str) -> Result<u64> {
    match value.trim().parse::<u64>() {
        Ok(id) if id != 0 => Ok(id),
        _ => Err(GameRemoverError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Expected a non-zero 64-bit Steam ID".to_string(),
        }),
    }
}

/// Steam ID 清單 (例如 owners) 中不可出現 0，0 代表內部呼叫者
pub fn validate_steam_ids(field_name: &str, ids: &[u64]) -> Result<()> {
    if ids.contains(&0) {
        return Err(GameRemoverError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: "0".to_string(),
            reason: "Steam IDs must be non-zero".to_string(),
        });
    }
    Ok(())
}

/// 帳號名稱必須能被 selector 精確選到：
/// 不可為空、不可含 `,`、`..` 或 `r!` 前綴，也不可與 `reserved` (全部帳號) 同名
pub fn validate_account_name(field_name: &str, name: &str, reserved: &str) -> Result<()> {
    validate_non_empty_string(field_name, name)?;

    let reason = if name.contains(',') {
        Some("Account names cannot contain ','".to_string())
    } else if name.contains("..") {
        Some("Account names cannot contain '..'".to_string())
    } else if name.starts_with("r!") {
        Some("Account names cannot start with 'r!'".to_string())
    } else if name.eq_ignore_ascii_case(reserved) {
        Some(format!("'{}' is reserved for all accounts", reserved))
    } else {
        None
    };

    match reason {
        Some(reason) => Err(GameRemoverError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}
