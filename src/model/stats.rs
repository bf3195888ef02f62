// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The five record tables a mutation can touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityTable {
    Diagram,
    Element,
    Classifier,
    Feature,
    Relationship,
}

impl EntityTable {
    pub const ALL: [EntityTable; 5] = [
        EntityTable::Diagram,
        EntityTable::Element,
        EntityTable::Classifier,
        EntityTable::Feature,
        EntityTable::Relationship,
    ];

    fn index(self) -> usize {
        match self {
            EntityTable::Diagram => 0,
            EntityTable::Element => 1,
            EntityTable::Classifier => 2,
            EntityTable::Feature => 3,
            EntityTable::Relationship => 4,
        }
    }
}

impl fmt::Display for EntityTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityTable::Diagram => "diagram",
            EntityTable::Element => "element",
            EntityTable::Classifier => "classifier",
            EntityTable::Feature => "feature",
            EntityTable::Relationship => "relationship",
        };
        write!(f, "{label}")
    }
}

/// What happened to a record, per table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatSeries {
    Created,
    Modified,
    Deleted,
    Errors,
}

impl StatSeries {
    pub const ALL: [StatSeries; 4] = [
        StatSeries::Created,
        StatSeries::Modified,
        StatSeries::Deleted,
        StatSeries::Errors,
    ];

    fn index(self) -> usize {
        match self {
            StatSeries::Created => 0,
            StatSeries::Modified => 1,
            StatSeries::Deleted => 2,
            StatSeries::Errors => 3,
        }
    }
}

/// Tallies of record changes per table and series.
///
/// Undo and redo report through this instead of failing fast, so one bad
/// replay entry does not hide how far the walk actually got.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChangeStats {
    counts: [[u64; 4]; 5],
}

impl ChangeStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, table: EntityTable, series: StatSeries) -> u64 {
        self.counts[table.index()][series.index()]
    }

    pub fn add(&mut self, table: EntityTable, series: StatSeries, amount: u64) {
        self.counts[table.index()][series.index()] += amount;
    }

    pub fn bump(&mut self, table: EntityTable, series: StatSeries) {
        self.add(table, series, 1);
    }

    pub fn total(&self, series: StatSeries) -> u64 {
        self.counts.iter().map(|row| row[series.index()]).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|row| row.iter().all(|&n| n == 0))
    }

    pub fn merge(&mut self, other: &ChangeStats) {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            for (m, t) in mine.iter_mut().zip(theirs.iter()) {
                *m += t;
            }
        }
    }
}

impl fmt::Display for ChangeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for table in EntityTable::ALL {
            for series in StatSeries::ALL {
                let n = self.count(table, series);
                if n == 0 {
                    continue;
                }
                if !first {
                    write!(f, ", ")?;
                }
                write!(f, "{table} {series:?}: {n}")?;
                first = false;
            }
        }
        if first {
            write!(f, "no changes")?;
        }
        Ok(())
    }
}
