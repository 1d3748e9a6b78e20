use crate::rpc::GitkitRpc;

use gitkit_core::{Account, GitkitError, Result as GitkitResult};

use std::collections::VecDeque;

use log::debug;

const INVALID_ITERATOR: &str = "invalid download account iterator";

/// Lazily walks every account via paged `downloadAccount` calls.
///
/// The first page is fetched on construction. Later pages are fetched only
/// when the buffered page has been consumed, using the continuation token of
/// the previous response. A response without a continuation token ends the
/// walk.
///
/// ```ignore
/// let mut users = client.get_all_users(Some(100))?;
/// while users.valid()? {
///     println!("{:?}", users.current()?.email);
///     users.advance()?;
/// }
/// ```
pub struct DownloadIterator<'a> {
    rpc: &'a dyn GitkitRpc,
    max_results: u32,
    next_page_token: Option<String>,
    last_page: bool,
    buffer: VecDeque<Account>,
    failed: bool,
}

impl<'a> DownloadIterator<'a> {
    pub fn new(rpc: &'a dyn GitkitRpc, max_results: u32) -> GitkitResult<Self> {
        let mut iterator = Self {
            rpc,
            max_results,
            next_page_token: None,
            last_page: false,
            buffer: VecDeque::new(),
            failed: false,
        };
        iterator.fetch_page()?;

        Ok(iterator)
    }

    /// Whether an account is available, fetching further pages as needed
    pub fn valid(&mut self) -> GitkitResult<bool> {
        while self.buffer.is_empty() && !self.last_page {
            self.fetch_page()?;
        }

        Ok(!self.buffer.is_empty())
    }

    /// The account at the cursor
    #[track_caller]
    pub fn current(&self) -> GitkitResult<&Account> {
        self.buffer
            .front()
            .ok_or_else(|| GitkitError::client(INVALID_ITERATOR))
    }

    /// Move past the account at the cursor
    #[track_caller]
    pub fn advance(&mut self) -> GitkitResult<()> {
        match self.buffer.pop_front() {
            Some(_) => Ok(()),
            None => Err(GitkitError::client(INVALID_ITERATOR)),
        }
    }

    fn fetch_page(&mut self) -> GitkitResult<()> {
        if self.last_page {
            return Ok(());
        }

        let page = self
            .rpc
            .download_account(self.next_page_token.as_deref(), self.max_results)?;

        self.next_page_token = page.continuation_token().map(String::from);
        self.last_page = self.next_page_token.is_none();

        let users = page.into_users();
        debug!(
            "Downloaded {} accounts (last page: {})",
            users.len(),
            self.last_page
        );
        self.buffer
            .extend(users.iter().map(Account::from_response));

        Ok(())
    }
}

impl Iterator for DownloadIterator<'_> {
    type Item = GitkitResult<Account>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        match self.valid() {
            Ok(true) => self.buffer.pop_front().map(Ok),
            Ok(false) => None,
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
