use std::cmp::Ordering;

/// Disjoint sets over the cell indices of one grid.
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
    size: Vec<usize>,
    sets: usize,
}

impl UnionFind {
    /// Every index in `0..len` starts as its own singleton set.
    pub fn new(len: usize) -> Self {
        UnionFind {
            parent: (0..len).collect(),
            rank: vec![0; len],
            size: vec![1; len],
            sets: len,
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Number of disjoint sets.
    pub fn set_count(&self) -> usize {
        self.sets
    }

    /// Turns `x` back into a singleton root.
    ///
    /// Only valid before `x` takes part in any union, otherwise members that point
    /// at `x` would be left in a set of their own.
    pub fn make_set(&mut self, x: usize) {
        if self.parent[x] != x || self.size[x] != 1 {
            self.sets += 1;
        }
        self.parent[x] = x;
        self.rank[x] = 0;
        self.size[x] = 1;
    }

    /// Root of the set containing `x`.
    ///
    /// Walks up to the root first, then points every node on the way directly at it.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// Read-only lookup of the root, without compressing the path.
    pub fn root_of(&self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        root
    }

    /// Merges the sets of `x` and `y`. Returns `false` if they were already joined.
    pub fn union(&mut self, x: usize, y: usize) -> bool {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return false; // Already in same set
        }

        let (root, child) = match self.rank[root_x].cmp(&self.rank[root_y]) {
            Ordering::Greater => (root_x, root_y),
            Ordering::Less => (root_y, root_x),
            Ordering::Equal => {
                self.rank[root_x] += 1;
                (root_x, root_y)
            }
        };
        self.parent[child] = root;
        self.size[root] += self.size[child];
        self.sets -= 1;
        true
    }

    /// Number of members in the set containing `x`.
    pub fn set_size(&mut self, x: usize) -> usize {
        let root = self.find(x);
        self.size[root]
    }

    /// Size of the biggest set, `0` when empty.
    pub fn largest_set(&self) -> usize {
        (0..self.len())
            .filter(|&x| self.parent[x] == x)
            .map(|root| self.size[root])
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_reports_merges() {
        let mut uf = UnionFind::new(4);
        assert_eq!(uf.set_count(), 4);
        assert!(uf.union(0, 1));
        assert!(uf.union(2, 3));
        assert!(!uf.union(1, 0));
        assert!(uf.union(1, 3));
        assert!(!uf.union(0, 2));
        assert_eq!(uf.set_count(), 1);
        assert_eq!(uf.set_size(2), 4);
        assert_eq!(uf.largest_set(), 4);
    }

    #[test]
    fn test_find_is_idempotent() {
        let mut uf = UnionFind::new(6);
        uf.union(0, 1);
        uf.union(2, 3);
        uf.union(1, 3);
        uf.union(4, 5);
        for x in 0..6 {
            let first = uf.find(x);
            assert_eq!(uf.find(x), first);
            assert_eq!(uf.root_of(x), first);
        }
        assert_eq!(uf.find(0), uf.find(3));
        assert_ne!(uf.find(0), uf.find(4));
    }

    #[test]
    fn test_find_compresses_path() {
        let mut uf = UnionFind::new(5);
        // Build a chain by hand: 4 -> 3 -> 2 -> 1 -> 0
        for x in 1..5 {
            uf.parent[x] = x - 1;
        }
        assert_eq!(uf.find(4), 0);
        assert!((1..5).all(|x| uf.parent[x] == 0));
    }

    #[test]
    fn test_make_set_restores_singleton() {
        let mut uf = UnionFind::new(3);
        uf.union(0, 1);
        assert_eq!(uf.set_count(), 2);
        uf.make_set(2);
        assert_eq!(uf.set_count(), 2);
        assert_eq!(uf.find(2), 2);
        assert!(UnionFind::new(0).is_empty());
        assert_eq!(UnionFind::new(0).largest_set(), 0);
    }
}
