use crate::domain::model::{AppId, AppIdSet};
use crate::utils::error::{GameRemoverError, Result};
use std::collections::HashSet;

/// 解析以逗號分隔的 appid 清單
///
/// Empty fragments are skipped. The first fragment that is not a number, is
/// zero, or repeats an earlier ID fails the whole list.
pub fn parse_app_ids(text: &str) -> Result<AppIdSet> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();

    for fragment in text.split(',').map(str::trim).filter(|f| !f.is_empty()) {
        let app_id = match fragment.parse::<AppId>() {
            Ok(id) if id != 0 && seen.insert(id) => id,
            _ => {
                return Err(GameRemoverError::InvalidIdentifier {
                    fragment: fragment.to_string(),
                })
            }
        };
        ids.push(app_id);
    }

    if ids.is_empty() {
        return Err(GameRemoverError::InvalidIdentifier {
            fragment: text.to_string(),
        });
    }

    Ok(AppIdSet::from_unique(ids))
}
