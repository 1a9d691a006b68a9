use crate::models::disk::PhysicalDisk;
use crate::models::memory::MemoryModule;
use crate::models::ComponentGroup;

/// Decides whether a component belongs to an existing group.
pub trait GroupKey {
    fn matches_group(&self, group: &Self) -> bool;
}

/// Memory merges on capacity alone; mixed DIMM types of equal size share a group.
impl GroupKey for MemoryModule {
    fn matches_group(&self, group: &Self) -> bool {
        self.capacity_mib == group.capacity_mib
    }
}

/// A group with a known speed only takes disks of that speed. A group
/// without speed matches on capacity and media type.
impl GroupKey for PhysicalDisk {
    fn matches_group(&self, group: &Self) -> bool {
        let same_shape = self.capacity_gb == group.capacity_gb && self.media_type == group.media_type;
        match group.speed {
            Some(speed) => same_shape && self.speed == Some(speed),
            None => same_shape,
        }
    }
}

/// Greedy first-match grouping in input order.
///
/// Each component joins the lowest-index group it matches, otherwise opens
/// a new group. Reordering the input can change the result, so callers keep
/// the device's fetch order.
pub fn group<T, I>(components: I) -> Vec<ComponentGroup<T>>
where
    T: GroupKey,
    I: IntoIterator<Item = T>,
{
    let mut groups: Vec<ComponentGroup<T>> = Vec::new();
    for component in components {
        match groups
            .iter_mut()
            .find(|group| component.matches_group(&group.attributes))
        {
            Some(group) => group.count += 1,
            None => {
                let index = groups.len();
                groups.push(ComponentGroup {
                    index,
                    attributes: component,
                    count: 1,
                });
            }
        }
    }
    groups
}
