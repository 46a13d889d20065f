use crate::domain::scheduler::link_store::LinkKey;

/// The channel × timeslot grid filled by one scheduling run.
///
/// Cells are addressed as `(channel, timeslot)` and hold at most one link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotFrame {
    num_channels: usize,
    num_timeslots: usize,

    /// Row per channel, column per timeslot.
    cells: Vec<Vec<Option<LinkKey>>>,
}

impl SlotFrame {
    pub fn new(num_channels: usize, num_timeslots: usize) -> Self {
        Self { num_channels, num_timeslots, cells: vec![vec![None; num_timeslots]; num_channels] }
    }

    pub fn num_channels(&self) -> usize {
        self.num_channels
    }

    pub fn num_timeslots(&self) -> usize {
        self.num_timeslots
    }

    pub fn get(&self, channel: usize, timeslot: usize) -> Option<LinkKey> {
        self.cells.get(channel).and_then(|row| row.get(timeslot)).copied().flatten()
    }

    pub fn is_free(&self, channel: usize, timeslot: usize) -> bool {
        channel < self.num_channels && timeslot < self.num_timeslots && self.get(channel, timeslot).is_none()
    }

    /// Puts a link into an empty cell.
    ///
    /// # Returns
    /// `false` if the cell is out of range or already taken; the frame is left unchanged.
    pub fn assign(&mut self, channel: usize, timeslot: usize, key: LinkKey) -> bool {
        if !self.is_free(channel, timeslot) {
            log::error!("Cell (channel {}, timeslot {}) is not available for assignment.", channel, timeslot);
            return false;
        }

        self.cells[channel][timeslot] = Some(key);
        true
    }

    /// Links occupying any channel of the given timeslot.
    pub fn links_in_timeslot(&self, timeslot: usize) -> impl Iterator<Item = LinkKey> + '_ {
        self.cells.iter().filter_map(move |row| row.get(timeslot).copied().flatten())
    }

    /// Every occupied cell as `(channel, timeslot, link)`, channel-major.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize, LinkKey)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(channel, row)| row.iter().enumerate().filter_map(move |(timeslot, cell)| cell.map(|key| (channel, timeslot, key))))
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied_cells().count()
    }

    pub fn placed_count(&self, key: LinkKey) -> usize {
        self.occupied_cells().filter(|(_, _, placed)| *placed == key).count()
    }

    /// Index of the last occupied timeslot plus one, 0 for an empty frame.
    pub fn used_length(&self) -> usize {
        self.occupied_cells().map(|(_, timeslot, _)| timeslot + 1).max().unwrap_or(0)
    }

    /// The cells of one timeslot, indexed by channel.
    pub fn column(&self, timeslot: usize) -> Vec<Option<LinkKey>> {
        self.cells.iter().map(|row| row.get(timeslot).copied().flatten()).collect()
    }

    /// Moves the content of channel `c` to channel `permutation[c]` within one timeslot.
    ///
    /// # Returns
    /// `false` (and leaves the column untouched) if `permutation` is not a bijection over
    /// `0..num_channels`.
    pub fn permute_timeslot(&mut self, timeslot: usize, permutation: &[usize]) -> bool {
        if timeslot >= self.num_timeslots || !is_permutation(permutation, self.num_channels) {
            log::error!("Rejected channel remap {:?} for timeslot {}.", permutation, timeslot);
            return false;
        }

        let column = self.column(timeslot);
        for (channel, cell) in column.into_iter().enumerate() {
            self.cells[permutation[channel]][timeslot] = cell;
        }
        true
    }
}

fn is_permutation(permutation: &[usize], size: usize) -> bool {
    if permutation.len() != size {
        return false;
    }

    let mut seen = vec![false; size];
    for &target in permutation {
        if target >= size || seen[target] {
            return false;
        }
        seen[target] = true;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn keys(count: usize) -> Vec<LinkKey> {
        let mut map: SlotMap<LinkKey, ()> = SlotMap::with_key();
        (0..count).map(|_| map.insert(())).collect()
    }

    #[test]
    fn assign_rejects_taken_and_out_of_range_cells() {
        let k = keys(2);
        let mut frame = SlotFrame::new(2, 3);

        assert!(frame.assign(1, 2, k[0]));
        assert!(!frame.assign(1, 2, k[1]));
        assert!(!frame.assign(2, 0, k[1]));
        assert!(!frame.assign(0, 3, k[1]));

        assert_eq!(frame.get(1, 2), Some(k[0]));
        assert_eq!(frame.used_length(), 3);
        assert_eq!(frame.occupied_count(), 1);
    }

    #[test]
    fn permutation_moves_whole_column() {
        let k = keys(2);
        let mut frame = SlotFrame::new(3, 2);
        frame.assign(0, 1, k[0]);
        frame.assign(1, 1, k[1]);
        frame.assign(0, 0, k[0]);

        assert!(frame.permute_timeslot(1, &[2, 0, 1]));

        assert_eq!(frame.column(1), vec![Some(k[1]), None, Some(k[0])]);
        // Other timeslots are untouched.
        assert_eq!(frame.column(0), vec![Some(k[0]), None, None]);
    }

    #[test]
    fn invalid_permutation_is_rejected() {
        let k = keys(1);
        let mut frame = SlotFrame::new(3, 1);
        frame.assign(0, 0, k[0]);

        assert!(!frame.permute_timeslot(0, &[1, 1, 0]));
        assert!(!frame.permute_timeslot(0, &[0, 1]));
        assert_eq!(frame.get(0, 0), Some(k[0]));
    }
}
