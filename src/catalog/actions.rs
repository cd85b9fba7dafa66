//! Standard actions of the built-in sequence tables.

use std::{collections::HashMap, str::FromStr, sync::OnceLock};

use strum::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

/// The sequence tables that carry standard actions.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    EnumCount,
    IntoStaticStr,
)]
pub enum SequenceTable {
    /// `AdminExecuteSequence`
    AdminExecuteSequence,
    /// `AdminUISequence`
    AdminUISequence,
    /// `AdvtExecuteSequence`
    AdvtExecuteSequence,
    /// `InstallExecuteSequence`
    InstallExecuteSequence,
    /// `InstallUISequence`
    InstallUISequence,
}

/// A standard action with its default placement in one sequence table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StandardAction {
    sequence_table: SequenceTable,
    action: &'static str,
    sequence: i16,
    condition: Option<&'static str>,
}

impl StandardAction {
    const fn new(
        sequence_table: SequenceTable,
        action: &'static str,
        sequence: i16,
        condition: Option<&'static str>,
    ) -> Self {
        StandardAction {
            sequence_table,
            action,
            sequence,
            condition,
        }
    }

    /// Sequence table the action is scheduled in
    #[must_use]
    pub fn sequence_table(&self) -> SequenceTable {
        self.sequence_table
    }

    /// Name of the action
    #[must_use]
    pub fn action(&self) -> &'static str {
        self.action
    }

    /// Default sequence number
    #[must_use]
    pub fn sequence(&self) -> i16 {
        self.sequence
    }

    /// Default condition
    #[must_use]
    pub fn condition(&self) -> Option<&'static str> {
        self.condition
    }

    /// Identifier of the form `SequenceTable/Action`
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}/{}", self.sequence_table, self.action)
    }
}

use SequenceTable::{
    AdminExecuteSequence as AdminExecute, AdminUISequence as AdminUi,
    AdvtExecuteSequence as AdvtExecute, InstallExecuteSequence as InstallExecute,
    InstallUISequence as InstallUi,
};

const NOT_INSTALLED: Option<&str> = Some("NOT Installed");
const VERSION_NT: Option<&str> = Some("VersionNT");

const STANDARD_ACTIONS: &[StandardAction] = &[
    // AdminExecuteSequence
    StandardAction::new(AdminExecute, "CostInitialize", 800, None),
    StandardAction::new(AdminExecute, "FileCost", 900, None),
    StandardAction::new(AdminExecute, "CostFinalize", 1000, None),
    StandardAction::new(AdminExecute, "InstallValidate", 1400, None),
    StandardAction::new(AdminExecute, "InstallInitialize", 1500, None),
    StandardAction::new(AdminExecute, "InstallAdminPackage", 3900, None),
    StandardAction::new(AdminExecute, "InstallFiles", 4000, None),
    StandardAction::new(AdminExecute, "PatchFiles", 4090, None),
    StandardAction::new(AdminExecute, "InstallFinalize", 6600, None),
    // AdminUISequence
    StandardAction::new(AdminUi, "CostInitialize", 800, None),
    StandardAction::new(AdminUi, "FileCost", 900, None),
    StandardAction::new(AdminUi, "CostFinalize", 1000, None),
    StandardAction::new(AdminUi, "ExecuteAction", 1300, None),
    // AdvtExecuteSequence
    StandardAction::new(AdvtExecute, "CostInitialize", 800, None),
    StandardAction::new(AdvtExecute, "CostFinalize", 1000, None),
    StandardAction::new(AdvtExecute, "InstallValidate", 1400, None),
    StandardAction::new(AdvtExecute, "InstallInitialize", 1500, None),
    StandardAction::new(AdvtExecute, "CreateShortcuts", 4500, None),
    StandardAction::new(AdvtExecute, "RegisterClassInfo", 4600, None),
    StandardAction::new(AdvtExecute, "RegisterExtensionInfo", 4700, None),
    StandardAction::new(AdvtExecute, "RegisterProgIdInfo", 4800, None),
    StandardAction::new(AdvtExecute, "RegisterMIMEInfo", 4900, None),
    StandardAction::new(AdvtExecute, "PublishComponents", 6200, None),
    StandardAction::new(AdvtExecute, "MsiPublishAssemblies", 6250, None),
    StandardAction::new(AdvtExecute, "PublishFeatures", 6300, None),
    StandardAction::new(AdvtExecute, "PublishProduct", 6400, None),
    StandardAction::new(AdvtExecute, "InstallFinalize", 6600, None),
    // InstallExecuteSequence
    StandardAction::new(InstallExecute, "FindRelatedProducts", 25, None),
    StandardAction::new(InstallExecute, "AppSearch", 50, None),
    StandardAction::new(InstallExecute, "LaunchConditions", 100, None),
    StandardAction::new(InstallExecute, "CCPSearch", 500, NOT_INSTALLED),
    StandardAction::new(InstallExecute, "RMCCPSearch", 600, NOT_INSTALLED),
    StandardAction::new(InstallExecute, "ValidateProductID", 700, None),
    StandardAction::new(InstallExecute, "CostInitialize", 800, None),
    StandardAction::new(InstallExecute, "FileCost", 900, None),
    StandardAction::new(InstallExecute, "IsolateComponents", 950, Some("RedirectedDllSupport")),
    StandardAction::new(InstallExecute, "CostFinalize", 1000, None),
    StandardAction::new(InstallExecute, "SetODBCFolders", 1100, None),
    StandardAction::new(InstallExecute, "MigrateFeatureStates", 1200, None),
    StandardAction::new(InstallExecute, "InstallValidate", 1400, None),
    StandardAction::new(InstallExecute, "InstallInitialize", 1500, None),
    StandardAction::new(InstallExecute, "AllocateRegistrySpace", 1550, NOT_INSTALLED),
    StandardAction::new(InstallExecute, "ProcessComponents", 1600, None),
    StandardAction::new(InstallExecute, "UnpublishComponents", 1700, None),
    StandardAction::new(InstallExecute, "MsiUnpublishAssemblies", 1750, None),
    StandardAction::new(InstallExecute, "UnpublishFeatures", 1800, None),
    StandardAction::new(InstallExecute, "StopServices", 1900, VERSION_NT),
    StandardAction::new(InstallExecute, "DeleteServices", 2000, VERSION_NT),
    StandardAction::new(InstallExecute, "UnregisterComPlus", 2100, None),
    StandardAction::new(InstallExecute, "SelfUnregModules", 2200, None),
    StandardAction::new(InstallExecute, "UnregisterTypeLibraries", 2300, None),
    StandardAction::new(InstallExecute, "RemoveODBC", 2400, None),
    StandardAction::new(InstallExecute, "UnregisterFonts", 2500, None),
    StandardAction::new(InstallExecute, "RemoveRegistryValues", 2600, None),
    StandardAction::new(InstallExecute, "UnregisterClassInfo", 2700, None),
    StandardAction::new(InstallExecute, "UnregisterExtensionInfo", 2800, None),
    StandardAction::new(InstallExecute, "UnregisterProgIdInfo", 2900, None),
    StandardAction::new(InstallExecute, "UnregisterMIMEInfo", 3000, None),
    StandardAction::new(InstallExecute, "RemoveIniValues", 3100, None),
    StandardAction::new(InstallExecute, "RemoveShortcuts", 3200, None),
    StandardAction::new(InstallExecute, "RemoveEnvironmentStrings", 3300, None),
    StandardAction::new(InstallExecute, "RemoveDuplicateFiles", 3400, None),
    StandardAction::new(InstallExecute, "RemoveFiles", 3500, None),
    StandardAction::new(InstallExecute, "RemoveFolders", 3600, None),
    StandardAction::new(InstallExecute, "CreateFolders", 3700, None),
    StandardAction::new(InstallExecute, "MoveFiles", 3800, None),
    StandardAction::new(InstallExecute, "InstallFiles", 4000, None),
    StandardAction::new(InstallExecute, "PatchFiles", 4090, None),
    StandardAction::new(InstallExecute, "DuplicateFiles", 4210, None),
    StandardAction::new(InstallExecute, "BindImage", 4300, None),
    StandardAction::new(InstallExecute, "CreateShortcuts", 4500, None),
    StandardAction::new(InstallExecute, "RegisterClassInfo", 4600, None),
    StandardAction::new(InstallExecute, "RegisterExtensionInfo", 4700, None),
    StandardAction::new(InstallExecute, "RegisterProgIdInfo", 4800, None),
    StandardAction::new(InstallExecute, "RegisterMIMEInfo", 4900, None),
    StandardAction::new(InstallExecute, "WriteRegistryValues", 5000, None),
    StandardAction::new(InstallExecute, "WriteIniValues", 5100, None),
    StandardAction::new(InstallExecute, "WriteEnvironmentStrings", 5200, None),
    StandardAction::new(InstallExecute, "RegisterFonts", 5300, None),
    StandardAction::new(InstallExecute, "InstallODBC", 5400, None),
    StandardAction::new(InstallExecute, "RegisterTypeLibraries", 5500, None),
    StandardAction::new(InstallExecute, "SelfRegModules", 5600, None),
    StandardAction::new(InstallExecute, "RegisterComPlus", 5700, None),
    StandardAction::new(InstallExecute, "InstallServices", 5800, VERSION_NT),
    StandardAction::new(InstallExecute, "MsiConfigureServices", 5850, Some("VersionMsi >= \"5.00\"")),
    StandardAction::new(InstallExecute, "StartServices", 5900, VERSION_NT),
    StandardAction::new(InstallExecute, "RegisterUser", 6000, None),
    StandardAction::new(InstallExecute, "RegisterProduct", 6100, None),
    StandardAction::new(InstallExecute, "PublishComponents", 6200, None),
    StandardAction::new(InstallExecute, "MsiPublishAssemblies", 6250, None),
    StandardAction::new(InstallExecute, "PublishFeatures", 6300, None),
    StandardAction::new(InstallExecute, "PublishProduct", 6400, None),
    StandardAction::new(InstallExecute, "InstallFinalize", 6600, None),
    // InstallUISequence
    StandardAction::new(InstallUi, "FindRelatedProducts", 25, None),
    StandardAction::new(InstallUi, "AppSearch", 50, None),
    StandardAction::new(InstallUi, "LaunchConditions", 100, None),
    StandardAction::new(InstallUi, "CCPSearch", 500, NOT_INSTALLED),
    StandardAction::new(InstallUi, "RMCCPSearch", 600, NOT_INSTALLED),
    StandardAction::new(InstallUi, "ValidateProductID", 700, None),
    StandardAction::new(InstallUi, "CostInitialize", 800, None),
    StandardAction::new(InstallUi, "FileCost", 900, None),
    StandardAction::new(InstallUi, "IsolateComponents", 950, Some("RedirectedDllSupport")),
    StandardAction::new(InstallUi, "CostFinalize", 1000, None),
    StandardAction::new(InstallUi, "MigrateFeatureStates", 1200, None),
    StandardAction::new(InstallUi, "ExecuteAction", 1300, None),
];

type ActionIndex = HashMap<SequenceTable, HashMap<&'static str, &'static StandardAction>>;

fn index() -> &'static ActionIndex {
    static INDEX: OnceLock<ActionIndex> = OnceLock::new();

    INDEX.get_or_init(|| {
        let mut index = ActionIndex::new();
        for action in STANDARD_ACTIONS {
            index
                .entry(action.sequence_table)
                .or_default()
                .insert(action.action, action);
        }
        index
    })
}

/// All standard actions, grouped by sequence table and ordered by sequence number
#[must_use]
pub fn standard_actions() -> &'static [StandardAction] {
    STANDARD_ACTIONS
}

/// Looks up a standard action by its `SequenceTable/Action` identifier.
///
/// Returns `None` for a malformed identifier, an unknown sequence table or an action that
/// is not scheduled in that table.
#[must_use]
pub fn standard_action(id: &str) -> Option<&'static StandardAction> {
    let (sequence_table, action) = id.split_once('/')?;
    let sequence_table = SequenceTable::from_str(sequence_table).ok()?;
    standard_action_in(sequence_table, action)
}

/// Looks up the standard action `action` of `sequence_table`
#[must_use]
pub fn standard_action_in(
    sequence_table: SequenceTable,
    action: &str,
) -> Option<&'static StandardAction> {
    index()
        .get(&sequence_table)
        .and_then(|actions| actions.get(action))
        .copied()
}

/// True if `action` is a standard action in any sequence table
#[must_use]
pub fn is_standard_action(action: &str) -> bool {
    STANDARD_ACTIONS.iter().any(|standard| standard.action == action)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_lookup_by_id_and_pair() {
        let action = standard_action("InstallExecuteSequence/InstallFiles").unwrap();
        assert_eq!(action.sequence(), 4000);
        assert_eq!(action.condition(), None);
        assert_eq!(action.id(), "InstallExecuteSequence/InstallFiles");

        let pair = standard_action_in(SequenceTable::InstallUISequence, "CCPSearch").unwrap();
        assert_eq!(pair.condition(), Some("NOT Installed"));
        assert_eq!(pair.sequence_table(), SequenceTable::InstallUISequence);
    }

    #[test]
    fn test_lookup_misses() {
        assert!(standard_action("InstallFiles").is_none());
        assert!(standard_action("NoSuchSequence/InstallFiles").is_none());
        assert!(standard_action("AdminUISequence/InstallFiles").is_none());
        assert!(standard_action_in(SequenceTable::AdminUISequence, "MyCustomAction").is_none());
    }

    #[test]
    fn test_is_standard_action() {
        assert!(is_standard_action("CostFinalize"));
        assert!(!is_standard_action("costfinalize"));
        assert!(!is_standard_action("MyCustomAction"));
    }

    #[test]
    fn test_every_sequence_is_populated_and_ordered() {
        for sequence_table in SequenceTable::iter() {
            let sequences: Vec<_> = standard_actions()
                .iter()
                .filter(|action| action.sequence_table() == sequence_table)
                .map(StandardAction::sequence)
                .collect();

            assert!(!sequences.is_empty(), "{sequence_table}");
            assert!(sequences.windows(2).all(|pair| pair[0] < pair[1]), "{sequence_table}");
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<_> = standard_actions().iter().map(StandardAction::id).collect();
        assert_eq!(ids.len(), standard_actions().len());
    }
}
