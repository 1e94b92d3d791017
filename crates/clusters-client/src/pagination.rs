use std::marker::PhantomData;

use async_trait::async_trait;
use futures::Stream;
use page_turner::PageTurner;
use page_turner::PageTurnerOutput;
use page_turner::TurnedPage;

use crate::resources::DEFAULT_PAGE_SIZE;
use crate::{Error, ListRequest};

/// A placeholder struct onto which we can implement [`page_turner::PageTurner`].
/// A [`ListRequest`] carries its own client, so this holds nothing.
pub struct PaginationClient<Item> {
    phantom: PhantomData<fn() -> Item>,
}

impl<T> PaginationClient<T>
where
    T: serde::de::DeserializeOwned + Send + Sync,
{
    pub fn new() -> Self {
        Self {
            phantom: PhantomData,
        }
    }
}

pub fn into_items<T>(request: ListRequest<T>) -> impl Stream<Item = Result<T, Error>>
where
    T: serde::de::DeserializeOwned + Send + Sync + 'static,
{
    PaginationClient::<T>::new().into_pages(request).items()
}

#[async_trait]
impl<Item> PageTurner<ListRequest<Item>> for PaginationClient<Item>
where
    Item: serde::de::DeserializeOwned + Send + Sync + 'static,
{
    type PageItem = Item;
    type PageError = Error;

    async fn turn_page(
        &self,
        request: ListRequest<Item>,
    ) -> PageTurnerOutput<Self, ListRequest<Item>> {
        let page = request.page_number().filter(|page| *page > 0).unwrap_or(1);
        let page_size = request
            .page_size()
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        let request = request.page(page).size(page_size);

        let response = request.send().await?;
        let total = response.total;
        let items = response.items.into_items();
        let fetched = (page - 1) * page_size + items.len() as i64;

        if !items.is_empty() && items.len() as i64 >= page_size && fetched < total {
            tracing::debug!(
                page,
                row_count = items.len(),
                total,
                "got back a full page, progressing to the next page"
            );
            Ok(TurnedPage::next(items, request.page(page + 1)))
        } else {
            tracing::debug!(
                page,
                row_count = items.len(),
                total,
                "got back a non-full page or reached the total, so we're done"
            );
            Ok(TurnedPage::last(items))
        }
    }
}
