mod page_limit;
