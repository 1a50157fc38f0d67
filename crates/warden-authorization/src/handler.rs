//! Request handler

use crate::keeper::{ActionRouter, BlockContext, DispatchResult, Keeper};
use crate::messages::DelegationMsg;
use warden_core::WardenResult;

impl<R: ActionRouter> Keeper<R> {
    /// Execute one delegation request.
    ///
    /// Only `ExecAuthorized` produces results; the other requests return an
    /// empty [`DispatchResult`].
    pub fn handle(
        &self,
        ctx: &mut BlockContext<'_>,
        msg: &DelegationMsg,
    ) -> WardenResult<DispatchResult> {
        match msg {
            DelegationMsg::Authorize(msg) => {
                self.authorize(
                    ctx,
                    msg.operator,
                    msg.authorizer,
                    msg.capability.clone(),
                    msg.expiration,
                )?;
            }
            DelegationMsg::Revoke(msg) => {
                self.revoke(ctx, msg.operator, msg.authorizer, &msg.action)?;
            }
            DelegationMsg::AuthorizeFeeAllowance(msg) => {
                self.authorize_fee_allowance(
                    ctx,
                    msg.operator,
                    msg.authorizer,
                    msg.allowance.clone(),
                )?;
            }
            DelegationMsg::RevokeFeeAllowance(msg) => {
                self.revoke_fee_allowance(ctx, msg.operator, msg.authorizer)?;
            }
            DelegationMsg::ExecAuthorized(msg) => {
                return self.dispatch_actions(ctx, msg.signer, &msg.actions);
            }
        }
        Ok(DispatchResult::default())
    }
}
