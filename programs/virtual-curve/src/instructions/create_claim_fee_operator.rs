use anchor_lang::prelude::*;

use crate::constants::admin::is_admin;
use crate::constants::CLAIM_FEE_OPERATOR_SEED;
use crate::error::PoolError;
use crate::events::ClaimFeeOperatorCreated;
use crate::state::ClaimFeeOperator;

#[derive(Accounts)]
pub struct CreateClaimFeeOperator<'info> {
    #[account(
        init,
        payer = admin,
        seeds = [CLAIM_FEE_OPERATOR_SEED, operator.key().as_ref()],
        bump,
        space = 8 + ClaimFeeOperator::INIT_SPACE
    )]
    pub claim_fee_operator: Account<'info, ClaimFeeOperator>,

    /// CHECK: identity being authorized to claim protocol fees
    pub operator: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = is_admin(admin.key) @ PoolError::Unauthorized
    )]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handle_create_claim_fee_operator(ctx: Context<CreateClaimFeeOperator>) -> Result<()> {
    let created_at = Clock::get()?.unix_timestamp;
    let claim_fee_operator = &mut ctx.accounts.claim_fee_operator;
    claim_fee_operator.operator = ctx.accounts.operator.key();
    claim_fee_operator.created_at = created_at;

    emit!(ClaimFeeOperatorCreated {
        operator: claim_fee_operator.operator,
        created_at,
    });
    Ok(())
}
