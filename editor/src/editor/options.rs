use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EditorOptions {
    /// Maximum number of undo points kept
    pub history_size: usize,
}

impl Default for EditorOptions {
    fn default() -> Self {
        EditorOptions { history_size: 1000 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WindowOptions {
    pub bytes_per_row: usize,
    /// Bytes per group in the hex column, groups are separated by a space
    pub group_size: usize,
    /// Rows kept visible above and below the cursor when scrolling
    pub scroll_off: usize,
}

impl Default for WindowOptions {
    fn default() -> Self {
        WindowOptions {
            bytes_per_row: 16,
            group_size: 1,
            scroll_off: 2,
        }
    }
}

impl WindowOptions {
    /// Set an option from its name, used by `:set name=value`
    pub(crate) fn set(&mut self, name: &str, value: usize) -> Result<(), String> {
        match name {
            "bytes_per_row" | "bpr" => {
                if value == 0 {
                    return Err("bytes_per_row must be at least 1".into());
                }
                self.bytes_per_row = value;
            }
            "group_size" => self.group_size = value,
            "scroll_off" => self.scroll_off = value,
            _ => return Err(format!("unknown option {}", name)),
        }

        Ok(())
    }
}
