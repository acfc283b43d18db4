//! Static overview data shown on the dashboard tabs.
//!
//! [`Overview`] holds which of the two tabs (contracts or recent chats) is
//! selected; the lists themselves never change.

use serde::Serialize;
use strum::{Display, EnumString};

use crate::panel::PanelKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum ContractStatus {
    Active,
    Pending,
    Signed,
    Draft,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contract {
    pub id: u32,
    pub name: &'static str,
    pub client: &'static str,
    pub date: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub status: ContractStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentChat {
    pub id: u32,
    pub title: &'static str,
    pub last_message: &'static str,
    pub date: &'static str,
    #[serde(rename = "type")]
    pub kind: PanelKind,
}

pub fn contracts() -> Vec<Contract> {
    vec![
        Contract {
            id: 1,
            name: "NDA - Project Alpha",
            client: "TechCorp Solutions",
            date: "2024-10-01",
            kind: "NDA",
            status: ContractStatus::Active,
        },
        Contract {
            id: 2,
            name: "Service Agreement - Q4",
            client: "Global Industries Inc.",
            date: "2024-09-15",
            kind: "MSA",
            status: ContractStatus::Pending,
        },
        Contract {
            id: 3,
            name: "Employment Contract - Jane Doe",
            client: "HR Department",
            date: "2024-10-20",
            kind: "HR",
            status: ContractStatus::Signed,
        },
        Contract {
            id: 4,
            name: "Partnership Deal - Beta",
            client: "Innovate Labs",
            date: "2024-11-05",
            kind: "Partnership",
            status: ContractStatus::Draft,
        },
    ]
}

pub fn recent_chats() -> Vec<RecentChat> {
    vec![
        RecentChat {
            id: 1,
            title: "Maintenance Law Query",
            last_message: "Explain Section 125 CrPC regarding maintenance...",
            date: "2024-11-07",
            kind: PanelKind::LegalQa,
        },
        RecentChat {
            id: 2,
            title: "Drafting NDA for Acme",
            last_message: "I need a simple NDA between Acme Corp and Jane Doe...",
            date: "2024-11-06",
            kind: PanelKind::ContractDrafting,
        },
        RecentChat {
            id: 3,
            title: "Intellectual Property Rights",
            last_message: "What is the duration of a standard patent in India?",
            date: "2024-11-05",
            kind: PanelKind::LegalQa,
        },
        RecentChat {
            id: 4,
            title: "Refining Termination Clause",
            last_message: "Please adjust the termination clause to 90 days notice.",
            date: "2024-11-05",
            kind: PanelKind::ContractDrafting,
        },
    ]
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DataTab {
    #[default]
    Contracts,
    Chats,
}

/// Rows of the selected tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverviewRows<'a> {
    Contracts(&'a [Contract]),
    Chats(&'a [RecentChat]),
}

/// Tabbed overview below the panel buttons.  Opens on the contracts tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overview {
    active_tab: DataTab,
    contracts: Vec<Contract>,
    recent_chats: Vec<RecentChat>,
}

impl Default for Overview {
    fn default() -> Self {
        Self {
            active_tab: DataTab::default(),
            contracts: contracts(),
            recent_chats: recent_chats(),
        }
    }
}

impl Overview {
    pub fn active_tab(&self) -> DataTab {
        self.active_tab
    }

    pub fn select(&mut self, tab: DataTab) {
        self.active_tab = tab;
    }

    pub fn rows(&self) -> OverviewRows<'_> {
        match self.active_tab {
            DataTab::Contracts => OverviewRows::Contracts(&self.contracts),
            DataTab::Chats => OverviewRows::Chats(&self.recent_chats),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn overview_opens_on_contracts_and_switches_tabs() {
        let mut overview = Overview::default();
        assert_eq!(overview.active_tab(), DataTab::Contracts);
        assert!(matches!(overview.rows(), OverviewRows::Contracts(rows) if rows.len() == 4));

        overview.select("chats".parse().unwrap());
        assert_eq!(overview.active_tab(), DataTab::Chats);
        match overview.rows() {
            OverviewRows::Chats(rows) => assert_eq!(rows[0].title, "Maintenance Law Query"),
            other => panic!("unexpected rows: {other:?}"),
        }

        overview.select(DataTab::Chats);
        assert_eq!(overview.active_tab(), DataTab::Chats);
    }

    #[test]
    fn overview_lists_are_populated_and_serialize_type_field() {
        let contracts = contracts();
        assert_eq!(contracts.len(), 4);
        assert_eq!(contracts[3].status.to_string(), "Draft");

        let chats = recent_chats();
        assert_eq!(chats.len(), 4);
        let json = serde_json::to_value(&chats[1]).unwrap();
        assert_eq!(json["type"], "Contract Drafting");
        assert_eq!(chats[1].kind.short_label(), "Drafting");
    }
}
