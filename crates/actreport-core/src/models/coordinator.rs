use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Faculty coordinators that can be attached to an activity report.
///
/// The list is closed: free-text names are not accepted anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Coordinator {
    Krishnappa,
    Nithyanandan,
    Nataraj,
    Mathiyalagan,
    JansiRani,
    Krishnaprabha,
    Hema,
    KishoreKumar,
    SebastianVindroJude,
    Mohankumar,
    Gunasekar,
    Raveen,
    Radhika,
    Sreeja,
}

impl Coordinator {
    /// All coordinators in display order.
    pub const ALL: [Coordinator; 14] = [
        Coordinator::Krishnappa,
        Coordinator::Nithyanandan,
        Coordinator::Nataraj,
        Coordinator::Mathiyalagan,
        Coordinator::JansiRani,
        Coordinator::Krishnaprabha,
        Coordinator::Hema,
        Coordinator::KishoreKumar,
        Coordinator::SebastianVindroJude,
        Coordinator::Mohankumar,
        Coordinator::Gunasekar,
        Coordinator::Raveen,
        Coordinator::Radhika,
        Coordinator::Sreeja,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Coordinator::Krishnappa => "Dr. M.RM. Krishnappa (Asso. Prof./Physics)",
            Coordinator::Nithyanandan => "Dr. S. Nithyanandan (Physical Director)",
            Coordinator::Nataraj => "Dr. B. Nataraj (Asso. Prof./ECE)",
            Coordinator::Mathiyalagan => "Dr. P. Mathiyalagan (Asso. Prof./CSE)",
            Coordinator::JansiRani => "Mrs.S.Jansi Rani, AP(Sl.Gr)/IT",
            Coordinator::Krishnaprabha => "Dr. S. Krishnaprabha (Asso. Prof./MBA)",
            Coordinator::Hema => "Dr. S. Hema (Asso. Prof./Civil)",
            Coordinator::KishoreKumar => "Dr. A. Kishore Kumar (AP(Sl.G)/RA)",
            Coordinator::SebastianVindroJude => "Dr. P. Sebastian Vindro Jude (AP(Sl.G)/EEE)",
            Coordinator::Mohankumar => "Mr. R. Mohankumar (AP(Sl.G)/EEE)",
            Coordinator::Gunasekar => "Dr. N. Gunasekar (Asso. Prof./Mech)",
            Coordinator::Raveen => "Dr. R. Raveen (AP(Sr.G)/Mech)",
            Coordinator::Radhika => "Dr. V. Radhika (Asso. Prof./BME)",
            Coordinator::Sreeja => "Dr. J. Sreeja (AP(Sl.G)/Chemistry)",
        }
    }

    /// Look up a coordinator by its 1-based position in [`Coordinator::ALL`].
    pub fn from_position(position: usize) -> Option<Coordinator> {
        position
            .checked_sub(1)
            .and_then(|index| Self::ALL.get(index))
            .copied()
    }
}

impl Display for Coordinator {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.display_name())
    }
}

/// Accepts the full display name (case-insensitive, surrounding whitespace
/// ignored) or a 1-based list position.
impl FromStr for Coordinator {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if let Ok(position) = trimmed.parse::<usize>() {
            return Coordinator::from_position(position).ok_or_else(|| {
                anyhow::anyhow!(
                    "Coordinator position {} out of range (1-{})",
                    position,
                    Coordinator::ALL.len()
                )
            });
        }

        Coordinator::ALL
            .iter()
            .find(|c| c.display_name().eq_ignore_ascii_case(trimmed))
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Unknown coordinator: {}", s))
    }
}

/// Coordinator selection held by a draft.
///
/// Single-select forms keep at most one value; multi-select forms keep a list
/// that behaves like a set for additions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordinatorSelection {
    Single(Option<Coordinator>),
    Multiple(Vec<Coordinator>),
}

impl CoordinatorSelection {
    pub fn is_empty(&self) -> bool {
        match self {
            CoordinatorSelection::Single(selected) => selected.is_none(),
            CoordinatorSelection::Multiple(selected) => selected.is_empty(),
        }
    }

    pub fn contains(&self, coordinator: Coordinator) -> bool {
        match self {
            CoordinatorSelection::Single(selected) => *selected == Some(coordinator),
            CoordinatorSelection::Multiple(selected) => selected.contains(&coordinator),
        }
    }

    /// Selected coordinators in selection order.
    pub fn as_list(&self) -> Vec<Coordinator> {
        match self {
            CoordinatorSelection::Single(selected) => selected.iter().copied().collect(),
            CoordinatorSelection::Multiple(selected) => selected.clone(),
        }
    }

    /// Display names joined with `separator`, the way the record store expects them.
    pub fn joined(&self, separator: &str) -> String {
        self.as_list()
            .iter()
            .map(Coordinator::display_name)
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Add or remove `coordinator`.
    ///
    /// Adding an already selected coordinator is a no-op. Removing drops every
    /// matching entry. On a single selection, including replaces the value and
    /// excluding clears it only when it matches.
    pub fn toggle(&mut self, coordinator: Coordinator, included: bool) {
        match self {
            CoordinatorSelection::Single(selected) => {
                if included {
                    *selected = Some(coordinator);
                } else if *selected == Some(coordinator) {
                    *selected = None;
                }
            }
            CoordinatorSelection::Multiple(selected) => {
                if included {
                    if !selected.contains(&coordinator) {
                        selected.push(coordinator);
                    }
                } else {
                    selected.retain(|c| *c != coordinator);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_has_fourteen_distinct_names() {
        let mut names: Vec<_> = Coordinator::ALL.iter().map(|c| c.display_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 14);
    }

    #[test]
    fn test_from_str_by_name_and_position() {
        let by_name: Coordinator = "  dr. s. hema (asso. prof./civil) ".parse().unwrap();
        assert_eq!(by_name, Coordinator::Hema);

        let by_position: Coordinator = "1".parse().unwrap();
        assert_eq!(by_position, Coordinator::Krishnappa);

        let last: Coordinator = "14".parse().unwrap();
        assert_eq!(last, Coordinator::Sreeja);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("Dr. X".parse::<Coordinator>().is_err());
        assert!("0".parse::<Coordinator>().is_err());
        assert!("15".parse::<Coordinator>().is_err());
    }

    #[test]
    fn test_toggle_add_is_idempotent() {
        let mut selection = CoordinatorSelection::Multiple(Vec::new());
        selection.toggle(Coordinator::Nataraj, true);
        selection.toggle(Coordinator::Nataraj, true);
        assert_eq!(
            selection,
            CoordinatorSelection::Multiple(vec![Coordinator::Nataraj])
        );
    }

    #[test]
    fn test_toggle_remove_drops_every_match() {
        let mut selection = CoordinatorSelection::Multiple(vec![
            Coordinator::Hema,
            Coordinator::Raveen,
            Coordinator::Hema,
        ]);
        selection.toggle(Coordinator::Hema, false);
        assert_eq!(
            selection,
            CoordinatorSelection::Multiple(vec![Coordinator::Raveen])
        );
    }

    #[test]
    fn test_toggle_single_selection() {
        let mut selection = CoordinatorSelection::Single(None);
        selection.toggle(Coordinator::Radhika, true);
        selection.toggle(Coordinator::Sreeja, true);
        assert_eq!(selection, CoordinatorSelection::Single(Some(Coordinator::Sreeja)));

        selection.toggle(Coordinator::Radhika, false);
        assert!(!selection.is_empty());

        selection.toggle(Coordinator::Sreeja, false);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_joined_uses_display_names() {
        let selection =
            CoordinatorSelection::Multiple(vec![Coordinator::Hema, Coordinator::Raveen]);
        assert_eq!(
            selection.joined(", "),
            "Dr. S. Hema (Asso. Prof./Civil), Dr. R. Raveen (AP(Sr.G)/Mech)"
        );
    }
}
