//! Token transfer capability
//!
//! The ledger only needs "move N units from A to B" and "balance of A".
//! [`InMemoryToken`] is an ERC-20-like book used by the binary and tests.

use std::collections::HashMap;

use lendpool_core::{AccountId, Amount, TokenError};
use parking_lot::Mutex;

/// External token movement, as seen by the ledger
pub trait TokenTransfer: Send + Sync {
    /// Move `amount` from `src` to `dst`, spending `spender`'s allowance over `src`
    fn transfer_from(
        &self,
        spender: &AccountId,
        src: &AccountId,
        dst: &AccountId,
        amount: Amount,
    ) -> Result<(), TokenError>;

    /// Move `amount` owned by `src` to `dst`
    fn transfer(&self, src: &AccountId, dst: &AccountId, amount: Amount)
        -> Result<(), TokenError>;

    fn balance_of(&self, owner: &AccountId) -> Amount;

    fn symbol(&self) -> &str;
}

#[derive(Debug, Default)]
struct TokenBook {
    balances: HashMap<AccountId, Amount>,
    // (owner, spender) -> remaining allowance
    allowances: HashMap<(AccountId, AccountId), Amount>,
    total_supply: Amount,
}

impl TokenBook {
    fn balance(&self, owner: &AccountId) -> Amount {
        self.balances.get(owner).copied().unwrap_or(0)
    }

    fn move_units(
        &mut self,
        src: &AccountId,
        dst: &AccountId,
        amount: Amount,
    ) -> Result<(), TokenError> {
        let available = self.balance(src);
        if available < amount {
            return Err(TokenError::InsufficientBalance {
                required: amount,
                available,
            });
        }
        if src == dst || amount == 0 {
            return Ok(());
        }
        let credited = self
            .balance(dst)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        self.balances.insert(src.clone(), available - amount);
        self.balances.insert(dst.clone(), credited);
        Ok(())
    }
}

/// Mintable fungible token with allowances. 18 decimals.
#[derive(Debug)]
pub struct InMemoryToken {
    name: String,
    symbol: String,
    book: Mutex<TokenBook>,
}

impl InMemoryToken {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            book: Mutex::new(TokenBook::default()),
        }
    }

    /// Create a token and mint `supply` to `owner`
    pub fn with_initial_supply(
        name: impl Into<String>,
        symbol: impl Into<String>,
        owner: &AccountId,
        supply: Amount,
    ) -> Result<Self, TokenError> {
        let token = Self::new(name, symbol);
        token.mint(owner, supply)?;
        Ok(token)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn decimals(&self) -> u8 {
        18
    }

    pub fn total_supply(&self) -> Amount {
        self.book.lock().total_supply
    }

    pub fn mint(&self, to: &AccountId, amount: Amount) -> Result<(), TokenError> {
        let mut book = self.book.lock();
        let supply = book
            .total_supply
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        let balance = book.balance(to) + amount;
        book.total_supply = supply;
        book.balances.insert(to.clone(), balance);
        tracing::debug!(to = %to, amount = %amount, symbol = %self.symbol, "Minted tokens");
        Ok(())
    }

    /// Set `spender`'s allowance over `owner`'s tokens. `Amount::MAX` never decreases.
    pub fn approve(&self, owner: &AccountId, spender: &AccountId, amount: Amount) {
        let mut book = self.book.lock();
        book.allowances
            .insert((owner.clone(), spender.clone()), amount);
    }

    pub fn allowance(&self, owner: &AccountId, spender: &AccountId) -> Amount {
        let book = self.book.lock();
        book.allowances
            .get(&(owner.clone(), spender.clone()))
            .copied()
            .unwrap_or(0)
    }
}

impl TokenTransfer for InMemoryToken {
    fn transfer_from(
        &self,
        spender: &AccountId,
        src: &AccountId,
        dst: &AccountId,
        amount: Amount,
    ) -> Result<(), TokenError> {
        let mut book = self.book.lock();
        let key = (src.clone(), spender.clone());
        let approved = book.allowances.get(&key).copied().unwrap_or(0);
        if approved < amount {
            return Err(TokenError::InsufficientAllowance {
                required: amount,
                approved,
            });
        }
        book.move_units(src, dst, amount)?;
        if approved != Amount::MAX {
            book.allowances.insert(key, approved - amount);
        }
        Ok(())
    }

    fn transfer(
        &self,
        src: &AccountId,
        dst: &AccountId,
        amount: Amount,
    ) -> Result<(), TokenError> {
        self.book.lock().move_units(src, dst, amount)
    }

    fn balance_of(&self, owner: &AccountId) -> Amount {
        self.book.lock().balance(owner)
    }

    fn symbol(&self) -> &str {
        &self.symbol
    }
}
