// SPDX-FileCopyrightText: 2025 - 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

use itertools::Itertools;
use std::fmt;
use std::ops::{Index, IndexMut};

use crate::error::Fault;

/// Number of ints shown per line by the [Debug](fmt::Debug) impl
const PAGE: usize = 512;

/// Memory that grows on access, up to a fixed limit
///
/// Any read or write of a non-negative address past the end zero-fills memory up to and including
/// that address. Negative addresses are rejected, and memory never shrinks.
#[derive(Clone)]
pub(super) struct IntcodeMem {
    cells: Vec<i64>,
    limit: usize,
}

impl IntcodeMem {
    /// Copy `program` into fresh memory. The limit never drops below the program length.
    pub(super) fn new(program: &[i64], limit: usize) -> Self {
        Self {
            cells: program.to_vec(),
            limit: limit.max(program.len()),
        }
    }

    /// Ensure `address` is usable, returning it as an index without growing memory
    pub(super) fn check(&self, address: i64) -> Result<usize, Fault> {
        let index = usize::try_from(address).map_err(|_| Fault::BadAddress(address))?;
        if index >= self.limit {
            return Err(Fault::MemoryLimit {
                address,
                limit: self.limit,
            });
        }
        Ok(index)
    }

    fn slot(&mut self, address: i64) -> Result<&mut i64, Fault> {
        let index = self.check(address)?;
        if index >= self.cells.len() {
            self.cells.resize(index + 1, 0);
        }
        Ok(&mut self.cells[index])
    }

    pub(super) fn read(&mut self, address: i64) -> Result<i64, Fault> {
        self.slot(address).map(|cell| *cell)
    }

    pub(super) fn write(&mut self, address: i64, value: i64) -> Result<(), Fault> {
        *self.slot(address)? = value;
        Ok(())
    }

    /// Look at memory without growing it. Out-of-range and negative addresses read as `0`.
    pub(super) fn peek(&self, address: i64) -> i64 {
        usize::try_from(address)
            .ok()
            .and_then(|i| self.cells.get(i))
            .copied()
            .unwrap_or_default()
    }

    /// Copy of the ints in `address..address + len`, zero-filled past the end
    pub(super) fn window(&self, address: i64, len: usize) -> Vec<i64> {
        (address..).take(len).map(|a| self.peek(a)).collect()
    }

    pub(super) fn as_slice(&self) -> &[i64] {
        &self.cells
    }

    pub(super) fn len(&self) -> usize {
        self.cells.len()
    }

    /// the cells, without any trailing zeroes
    fn significant(&self) -> &[i64] {
        let end = self
            .cells
            .iter()
            .rposition(|&c| c != 0)
            .map_or(0, |last| last + 1);
        &self.cells[..end]
    }
}

// trailing zeroes are the same as unallocated memory
impl PartialEq for IntcodeMem {
    fn eq(&self, other: &Self) -> bool {
        self.significant() == other.significant()
    }
}

impl Index<usize> for IntcodeMem {
    type Output = i64;
    fn index(&self, i: usize) -> &i64 {
        self.cells.get(i).unwrap_or(&0)
    }
}

/// Host-side access. Grows memory like an instruction would, but ignores the limit.
impl IndexMut<usize> for IntcodeMem {
    fn index_mut(&mut self, i: usize) -> &mut i64 {
        if i >= self.cells.len() {
            self.cells.resize(i + 1, 0);
        }
        &mut self.cells[i]
    }
}

impl fmt::Debug for IntcodeMem {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fmtmap = fmt.debug_map();
        for (page_num, page) in self.cells.iter().chunks(PAGE).into_iter().enumerate() {
            let page = page.collect_vec();
            if page.iter().any(|&&c| c != 0) {
                fmtmap.entry(
                    &format_args!("{{ page 0x{:04x} }}", page_num * PAGE),
                    &format_args!("{page:?}"),
                );
            }
        }
        fmtmap.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_and_writes_grow_memory() {
        let mut mem = IntcodeMem::new(&[1, 2, 3], 64);
        assert_eq!(mem.read(9), Ok(0));
        assert_eq!(mem.len(), 10);
        mem.write(20, 7).unwrap();
        assert_eq!(mem.len(), 21);
        assert_eq!(mem.as_slice()[..3], [1, 2, 3]);
        assert_eq!(mem.peek(20), 7);
    }

    #[test]
    fn negative_addresses_rejected() {
        let mut mem = IntcodeMem::new(&[1, 2, 3], 64);
        assert_eq!(mem.read(-1), Err(Fault::BadAddress(-1)));
        assert_eq!(mem.write(-5, 1), Err(Fault::BadAddress(-5)));
        assert_eq!(mem.len(), 3);
    }

    #[test]
    fn limit_enforced_without_growth() {
        let mut mem = IntcodeMem::new(&[0; 4], 8);
        assert_eq!(mem.read(7), Ok(0));
        assert_eq!(
            mem.write(8, 1),
            Err(Fault::MemoryLimit {
                address: 8,
                limit: 8
            })
        );
        assert_eq!(mem.len(), 8);
    }

    #[test]
    fn peek_does_not_grow() {
        let mem = IntcodeMem::new(&[5], 8);
        assert_eq!(mem.peek(3), 0);
        assert_eq!(mem.peek(-3), 0);
        assert_eq!(mem.window(0, 3), vec![5, 0, 0]);
        assert_eq!(mem.len(), 1);
    }

    #[test]
    fn trailing_zeroes_ignored_in_comparison() {
        let a = IntcodeMem::new(&[1, 2], 8);
        let mut b = a.clone();
        b.read(6).unwrap();
        assert_eq!(a, b);
        b[3] = 1;
        assert_ne!(a, b);
    }
}
