use crate::{DisjointSubsets, IndexSubsets};

/// Greedily colors the subsets so that the subsets of each color are pairwise disjoint.
///
/// Subsets are visited in label order. Every pass over the remaining subsets builds one color:
/// a subset joins the color unless one of its indices was already claimed by the color,
/// in which case it is postponed to a later pass. The labels within each color are therefore
/// increasing, and every label appears in exactly one color.
pub fn sequential_greedy_coloring<S>(subsets: &S) -> Vec<DisjointSubsets>
where
    S: ?Sized + IndexSubsets,
{
    let mut colors = Vec::new();
    let mut pending: Vec<usize> = (0..subsets.num_subsets()).collect();
    // claimed[idx] is the number of the last color that claimed idx, zero if none did
    let mut claimed: Vec<usize> = Vec::new();

    while !pending.is_empty() {
        let color_number = colors.len() + 1;
        let mut labels = Vec::new();
        let mut max_index = None;

        pending.retain(|&label| {
            let subset = subsets.subset(label);
            if subset
                .iter()
                .any(|&idx| claimed.get(idx) == Some(&color_number))
            {
                return true;
            }
            if let Some(&largest) = subset.iter().max() {
                if largest >= claimed.len() {
                    claimed.resize(2 * largest + 1, 0);
                }
                max_index = max_index.max(Some(largest));
            }
            for &idx in subset {
                claimed[idx] = color_number;
            }
            labels.push(label);
            false
        });

        debug_assert!(DisjointSubsets::try_from_labels(subsets, labels.clone()).is_ok());
        // Every index of the color was claimed exactly once above
        colors.push(unsafe { DisjointSubsets::from_labels_unchecked(labels, max_index) });
    }

    colors
}
