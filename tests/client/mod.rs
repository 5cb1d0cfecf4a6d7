//! Tests for the reconciliation core's HTTP collaborators.

mod remote;
