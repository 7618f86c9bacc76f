// Copyright 2024 The Tari Development Community
// SPDX-License-Identifier: BSD-3-Clause

//! `msp` package: the membership-service-provider identity wrapper used as the
//! `Creator` of every signed request.

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SerializedIdentity {
    #[prost(string, tag = "1")]
    pub mspid: ::std::string::String,
    /// PEM-encoded X.509 certificate bytes.
    #[prost(bytes, tag = "2")]
    pub id_bytes: ::std::vec::Vec<u8>,
}
