use crate::entity::{Loan, LoanId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait LoanModifier<Connection: 'static + Send>: 'static + Sync + Send {
    async fn create(
        &self,
        con: &mut Connection,
        loan: &Loan,
    ) -> error_stack::Result<(), KernelError>;
    /// `false` when no loan with the given id exists.
    async fn delete(
        &self,
        con: &mut Connection,
        loan_id: &LoanId,
    ) -> error_stack::Result<bool, KernelError>;
}

pub trait DependOnLoanModifier<Connection: 'static + Send>: 'static + Sync + Send {
    type LoanModifier: LoanModifier<Connection>;
    fn loan_modifier(&self) -> &Self::LoanModifier;
}
