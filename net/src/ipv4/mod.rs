// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! IPv4 address parsing

pub mod addr;

pub use addr::parse_ipv4;
