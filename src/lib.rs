// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Proteus: UML model core (store + undo log + consistency rules).
//!
//! The embedding application talks to [`ops::Controller`]: every mutation
//! goes through it, lands in the ring-buffer action log as an undoable set,
//! and is followed by the consistency rules in [`policy`].

pub mod history;
pub mod model;
pub mod ops;
pub mod policy;
pub mod store;
