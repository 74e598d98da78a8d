//! Sync plan computation.
//!
//! Pure classification of the two snapshots — no I/O, which is what keeps
//! the decision logic testable apart from either store.

use rolo_core::{Contact, VaultRecord};

/// The actions one reconciliation cycle will apply.
///
/// Every contact lands in exactly one bucket, classified solely by uid
/// membership. There is no delete in either direction: a contact removed
/// from one side is recreated on it from the surviving copy.
#[derive(Debug, Clone, Default)]
pub struct SyncPlan {
    /// Uid present on both sides — apply the remote fields to the local
    /// note. Remote-snapshot order.
    pub update_local: Vec<(VaultRecord, Contact)>,
    /// Uid only on the remote — create a local note. Remote-snapshot order.
    pub create_local: Vec<Contact>,
    /// Uid only in the vault — upload to the server. Local-snapshot order.
    pub create_remote: Vec<Contact>,
}

impl SyncPlan {
    /// Total number of operations the plan will issue.
    #[must_use]
    pub fn len(&self) -> usize {
        self.update_local.len() + self.create_local.len() + self.create_remote.len()
    }

    /// Whether the plan issues no operations at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Classify both snapshots into a [`SyncPlan`].
///
/// Identity is uid string equality — case-sensitive, no normalization.
/// Matching is a linear scan in both directions; contact collections are
/// small (tens to low thousands), so O(n·m) is fine here. If that ever
/// changes, a hash join by uid produces identical output.
#[must_use]
pub fn compute_plan(remote: &[Contact], local: &[VaultRecord]) -> SyncPlan {
    let mut plan = SyncPlan::default();

    for contact in remote {
        match local.iter().find(|r| r.contact.uid == contact.uid) {
            Some(record) => plan
                .update_local
                .push((record.clone(), contact.clone())),
            None => plan.create_local.push(contact.clone()),
        }
    }

    for record in local {
        if !remote.iter().any(|c| c.uid == record.contact.uid) {
            plan.create_remote.push(record.contact.clone());
        }
    }

    plan
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn record(uid: &str, name: &str) -> VaultRecord {
        VaultRecord {
            path: PathBuf::from(format!("/vault/{name}.md")),
            contact: Contact::new(uid, name),
        }
    }

    #[test]
    fn classifies_into_exactly_one_bucket() {
        let remote = vec![Contact::new("a", "A"), Contact::new("b", "B")];
        let local = vec![record("b", "B"), record("c", "C")];

        let plan = compute_plan(&remote, &local);

        assert_eq!(plan.create_local.len(), 1);
        assert_eq!(plan.create_local[0].uid, "a");
        assert_eq!(plan.update_local.len(), 1);
        assert_eq!(plan.update_local[0].1.uid, "b");
        assert_eq!(plan.create_remote.len(), 1);
        assert_eq!(plan.create_remote[0].uid, "c");
        assert_eq!(plan.len(), 3);
    }

    #[test]
    fn identical_snapshots_plan_only_updates() {
        let remote = vec![Contact::new("a", "A"), Contact::new("b", "B")];
        let local = vec![record("a", "A"), record("b", "B")];

        let plan = compute_plan(&remote, &local);
        assert_eq!(plan.update_local.len(), 2);
        assert!(plan.create_local.is_empty());
        assert!(plan.create_remote.is_empty());
    }

    #[test]
    fn uid_matching_is_case_sensitive() {
        let remote = vec![Contact::new("ABC", "Remote")];
        let local = vec![record("abc", "Local")];

        let plan = compute_plan(&remote, &local);
        assert_eq!(plan.create_local.len(), 1);
        assert_eq!(plan.create_remote.len(), 1);
        assert!(plan.update_local.is_empty());
    }

    #[test]
    fn order_follows_snapshot_iteration_order() {
        let remote = vec![
            Contact::new("r2", "R2"),
            Contact::new("r1", "R1"),
            Contact::new("shared", "S"),
        ];
        let local = vec![record("l9", "L9"), record("shared", "S"), record("l1", "L1")];

        let plan = compute_plan(&remote, &local);
        let created: Vec<&str> = plan.create_local.iter().map(|c| c.uid.as_str()).collect();
        assert_eq!(created, vec!["r2", "r1"]);
        let uploaded: Vec<&str> = plan.create_remote.iter().map(|c| c.uid.as_str()).collect();
        assert_eq!(uploaded, vec!["l9", "l1"]);
    }

    #[test]
    fn empty_snapshots_make_empty_plan() {
        let plan = compute_plan(&[], &[]);
        assert!(plan.is_empty());
    }

    #[test]
    fn update_keeps_the_record_handle() {
        let remote = vec![Contact::new("a", "New Name")];
        let local = vec![record("a", "Old Name")];

        let plan = compute_plan(&remote, &local);
        let (rec, contact) = &plan.update_local[0];
        assert_eq!(rec.path, PathBuf::from("/vault/Old Name.md"));
        assert_eq!(contact.full_name, "New Name");
    }
}
