// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

pub mod assign;
pub mod fragments;
pub mod parse;

pub use assign::assign_command;
pub use fragments::fragments_command;
pub use parse::parse_command;
