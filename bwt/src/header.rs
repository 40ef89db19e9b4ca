// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: Apache-2.0

pub(crate) const MAGIC: u32 = 0x2b9f6a31;
pub(crate) const VERSION: u32 = 1;
