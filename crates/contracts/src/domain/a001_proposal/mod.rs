pub mod aggregate;

pub use aggregate::{Proposal, ProposalChanges, ProposalItem};
