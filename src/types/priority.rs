use std::fmt;

use colored::Colorize;

/// Priority levels for issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    /// No priority (0)
    None = 0,
    /// Urgent priority (1)
    Urgent = 1,
    /// High priority (2)
    High = 2,
    /// Medium priority (3)
    Medium = 3,
    /// Low priority (4)
    Low = 4,
}

/// Label and CSS class for a raw priority value.
///
/// Total over `i32`: anything outside 0..=4 renders as "None".
pub fn label_for(priority: i32) -> (&'static str, &'static str) {
    let priority = Priority::from_i32(priority);
    (priority.label(), priority.style())
}

impl Priority {
    /// Create Priority from an integer value.
    pub fn from_i32(value: i32) -> Self {
        match value {
            1 => Priority::Urgent,
            2 => Priority::High,
            3 => Priority::Medium,
            4 => Priority::Low,
            _ => Priority::None,
        }
    }

    /// Get the label for this priority.
    pub fn label(self) -> &'static str {
        match self {
            Priority::None => "None",
            Priority::Urgent => "Urgent",
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// CSS class used for the badge on the issues page.
    pub fn style(self) -> &'static str {
        match self {
            Priority::None => "priority-none",
            Priority::Urgent => "priority-urgent",
            Priority::High => "priority-high",
            Priority::Medium => "priority-medium",
            Priority::Low => "priority-low",
        }
    }

    /// Get the colored label for terminal output.
    pub fn colored(self) -> String {
        let label = self.label();
        match self {
            Priority::None => label.bright_black().to_string(),
            Priority::Urgent => label.red().bold().to_string(),
            Priority::High => label.truecolor(255, 140, 0).bold().to_string(),
            Priority::Medium => label.yellow().to_string(),
            Priority::Low => label.blue().to_string(),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_for_known_values() {
        assert_eq!(label_for(0), ("None", "priority-none"));
        assert_eq!(label_for(1), ("Urgent", "priority-urgent"));
        assert_eq!(label_for(2), ("High", "priority-high"));
        assert_eq!(label_for(3), ("Medium", "priority-medium"));
        assert_eq!(label_for(4), ("Low", "priority-low"));
    }

    #[test]
    fn test_label_for_out_of_range_falls_back_to_none() {
        for value in [-1, -100, 5, 42, i32::MIN, i32::MAX] {
            assert_eq!(label_for(value), ("None", "priority-none"), "value {value}");
        }
    }

    #[test]
    fn test_display_matches_label() {
        assert_eq!(Priority::Urgent.to_string(), "Urgent");
    }
}
