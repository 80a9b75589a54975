//! The adaptive symbol table: keeps the live leaf set sorted by weight
//! descending and rebuilds the working tree after every mutation (§4.B).

use super::tree::{NodeRef, WorkingTree};
use super::window::Window;
use crate::symbol::{Symbol, EOF_IDX, NEW_IDX, NUM_SLOTS};

pub struct SymbolTable {
    tree: WorkingTree,
    /// live leaf dense indices, sorted by count descending; the final
    /// two entries are always `NEW_IDX` then `EOF_IDX`.
    leaves: Vec<u16>,
    count: [u32; NUM_SLOTS],
    active: [bool; NUM_SLOTS],
    window: Option<Window>,
    /// reused ascending-by-count scratch buffer, avoids a per-symbol allocation.
    scratch: Vec<(u16, u32)>,
}

impl SymbolTable {
    pub fn new(win_size: i64) -> Self {
        let mut table = Self {
            tree: WorkingTree::default(),
            leaves: vec![NEW_IDX, EOF_IDX],
            count: [0; NUM_SLOTS],
            active: [false; NUM_SLOTS],
            window: Window::new(win_size),
            scratch: Vec::with_capacity(NUM_SLOTS),
        };
        table.count[NEW_IDX as usize] = 1;
        table.count[EOF_IDX as usize] = 1;
        table.active[NEW_IDX as usize] = true;
        table.active[EOF_IDX as usize] = true;
        table.rebuild();
        table
    }

    pub fn lookup(&self, value: Symbol) -> Option<u16> {
        let idx = value.index();
        if self.active[idx as usize] { Some(idx) } else { None }
    }

    /// True once at least one real byte has been bootstrapped, i.e. the
    /// table holds more than the two sentinel leaves. Gates whether
    /// `Encoder::close` emits an EOF code at all (§4.D).
    pub fn has_real_symbols(&self) -> bool {
        self.leaves.len() > 2
    }

    pub fn root(&self) -> NodeRef {
        self.tree.root().expect("symbol table always carries the NEW/EOF sentinel leaves")
    }

    pub fn descend(&self, node: NodeRef, bit: bool) -> NodeRef {
        self.tree.child(node, bit)
    }

    pub fn as_leaf(&self, node: NodeRef) -> Option<u16> {
        self.tree.as_leaf(node)
    }

    pub fn code(&self, idx: u16) -> (u64, u8) {
        self.tree.code(idx)
    }

    /// Bootstrap a first-seen symbol: splice a fresh count-1 leaf in
    /// immediately before the two sentinels.
    pub fn insert(&mut self, value: Symbol) -> u16 {
        let idx = value.index();
        let pos = self.leaves.len() - 2;
        self.leaves.insert(pos, idx);
        self.count[idx as usize] = 1;
        self.active[idx as usize] = true;
        log::debug!("bootstrapped new symbol {value:?}, live alphabet now {}", self.leaves.len());
        self.note_symbol(idx);
        self.rebuild();
        idx
    }

    /// Increment a leaf's count, preserving the descending-by-count sort
    /// by swapping it to the front of its current equal-count run.
    pub fn update(&mut self, idx: u16) {
        let c = self.count[idx as usize];
        let live = self.leaves.len() - 2;
        let i = self.leaves[..live].partition_point(|&x| self.count[x as usize] > c);
        let mut j = i;
        while self.leaves[j] != idx {
            j += 1;
        }
        if i != j {
            self.leaves.swap(i, j);
        }
        self.count[idx as usize] = c + 1;
        self.note_symbol(idx);
        self.rebuild();
    }

    /// Decrement a leaf's count (window eviction only), removing it
    /// entirely once it would fall to zero. Never called on a sentinel.
    fn decrement(&mut self, idx: u16) {
        let c = self.count[idx as usize];
        let live = self.leaves.len() - 2;
        let j = self.leaves[..live]
            .iter()
            .position(|&x| x == idx)
            .expect("window evicted a symbol that is not live, violating the count/window invariant");
        if c > 1 {
            let mut k = j;
            while k + 1 < live && self.count[self.leaves[k + 1] as usize] == c {
                k += 1;
            }
            if k != j {
                self.leaves.swap(j, k);
            }
            self.count[idx as usize] = c - 1;
        } else {
            log::trace!("window eviction dropped symbol index {idx} from the table");
            self.leaves.remove(j);
            self.active[idx as usize] = false;
            self.count[idx as usize] = 0;
        }
    }

    /// Feed the just-inserted/updated symbol to the sliding window, if
    /// any, decrementing whatever it evicts first (§4.C).
    fn note_symbol(&mut self, idx: u16) {
        let evicted = match &self.window {
            Some(win) if win.is_filled() => Some(win.peek()),
            _ => None,
        };
        if let Some(ev) = evicted {
            self.decrement(ev);
        }
        if let Some(win) = &mut self.window {
            win.store(idx);
        }
    }

    fn rebuild(&mut self) {
        self.scratch.clear();
        for &idx in self.leaves.iter().rev() {
            self.scratch.push((idx, self.count[idx as usize]));
        }
        self.tree.build_sorted(&self.scratch);
        log::trace!("rebuilt huffman tree with {} live leaves", self.leaves.len());
    }

    #[cfg(test)]
    pub fn leaf_snapshot(&self) -> Vec<(u16, u32)> {
        self.leaves.iter().map(|&idx| (idx, self.count[idx as usize])).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_only_the_sentinels() {
        let t = SymbolTable::new(-1);
        assert!(!t.has_real_symbols());
        assert_eq!(t.leaf_snapshot(), vec![(NEW_IDX, 1), (EOF_IDX, 1)]);
        assert!(t.lookup(Symbol::Byte(b'a')).is_none());
    }

    #[test]
    fn insert_then_lookup_succeeds() {
        let mut t = SymbolTable::new(-1);
        t.insert(Symbol::Byte(b'a'));
        assert!(t.has_real_symbols());
        assert_eq!(t.lookup(Symbol::Byte(b'a')), Some(b'a' as u16));
        assert!(is_sorted_descending(&t));
    }

    #[test]
    fn sort_invariant_holds_across_many_updates() {
        let mut t = SymbolTable::new(-1);
        let text = b"the quick brown fox jumps over the lazy dog the fox runs";
        for &b in text {
            match t.lookup(Symbol::Byte(b)) {
                Some(idx) => t.update(idx),
                None => {
                    t.insert(Symbol::Byte(b));
                }
            }
            assert!(is_sorted_descending(&t), "violated after byte {b}");
        }
        let snap = t.leaf_snapshot();
        assert_eq!(snap[snap.len() - 2].0, NEW_IDX);
        assert_eq!(snap[snap.len() - 1].0, EOF_IDX);
    }

    #[test]
    fn window_bounds_the_live_count_sum() {
        let mut t = SymbolTable::new(16);
        let text = b"abcabcabcabcabcabcabcabcabcabcabcabcabcabcabcabc";
        for &b in text {
            match t.lookup(Symbol::Byte(b)) {
                Some(idx) => t.update(idx),
                None => {
                    t.insert(Symbol::Byte(b));
                }
            }
        }
        let live_sum: u32 = t
            .leaf_snapshot()
            .iter()
            .filter(|&&(idx, _)| idx != NEW_IDX && idx != EOF_IDX)
            .map(|&(_, c)| c)
            .sum();
        assert_eq!(live_sum, 16);
    }

    fn is_sorted_descending(t: &SymbolTable) -> bool {
        let snap = t.leaf_snapshot();
        let live = &snap[..snap.len() - 2];
        live.windows(2).all(|w| w[0].1 >= w[1].1)
    }
}
