use groupfem::dimensions::Dimensions;
use groupfem::set::{AssemblyKind, DataCategory, GroupFemSet, Ownership, SetLayout, TransferOptions};
use groupfem::GroupFemBlock;

fn node_based_set(na: usize) -> GroupFemSet {
    GroupFemSet::from_layout(SetLayout {
        assembly: AssemblyKind::NodeBased,
        dimensions: Dimensions::symmetric(na, 1),
        ncoeffs_at_node: 1,
        ..SetLayout::default()
    })
    .unwrap()
}

#[test]
fn resize_grows_and_truncates() {
    let mut block = GroupFemBlock::<f64>::with_sets(3);
    assert_eq!(block.len(), 3);
    block[0] = node_based_set(5);
    block[2] = node_based_set(7);

    let mut observer = GroupFemSet::new();
    observer.duplicate_from(&block[2], &TransferOptions::default());
    assert!(observer.node_coefficients().is_some());

    block.resize(1);
    assert_eq!(block.len(), 1);
    // The truncated set was released
    assert!(observer.node_coefficients().is_none());

    block.resize(4);
    assert_eq!(block.len(), 4);
    assert_eq!(block[0].na(), 5);
    assert_eq!(block[3].na(), 0);
}

#[test]
fn copy_reallocates_to_source_size() {
    let mut source = GroupFemBlock::<f64>::new();
    source.resize(2);
    source[0] = node_based_set(3);
    source[1] = node_based_set(9);

    let mut target = GroupFemBlock::<f64>::with_sets(5);
    target.copy_from(&source, &TransferOptions::default());
    assert_eq!(target.len(), 2);
    let nas: Vec<_> = target.iter().map(GroupFemSet::na).collect();
    assert_eq!(nas, vec![3, 9]);
    assert!(target
        .iter()
        .all(|set| set.ownership(DataCategory::NodeData) == Ownership::Owned));
}

#[test]
fn duplicate_aliases_every_set() {
    let mut source = GroupFemBlock::<f64>::with_sets(2);
    for set in source.iter_mut() {
        *set = node_based_set(4);
    }

    let mut target = GroupFemBlock::<f64>::new();
    target.duplicate_from(&source, &TransferOptions::default());
    for set in &target {
        assert_eq!(set.ownership(DataCategory::NodeData), Ownership::Aliased);
    }

    target[1].node_coefficients().unwrap().write().as_mut_slice()[0] = 2.5;
    assert_eq!(source[1].node_coefficients().unwrap().to_vec()[0], 2.5);
}

#[test]
fn release_empties_block() {
    let mut block = GroupFemBlock::<f64>::with_sets(2);
    assert!(!block.is_empty());
    block.release();
    assert!(block.is_empty());
    block.release();
    assert!(block.is_empty());
}

#[test]
fn display_lists_sets() {
    let mut block = GroupFemBlock::<f64>::with_sets(2);
    block[1] = node_based_set(3);
    let summary = block.to_string();
    assert!(summary.starts_with("GroupFemBlock with 2 sets"));
    assert!(summary.contains("[1] GroupFemSet:"));
    assert!(summary.contains("NodeBased"));
    block.log_info();
}
