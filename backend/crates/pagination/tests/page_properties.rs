//! Collection-wide properties of the paginator.

use pagination::Paginator;
use rstest::rstest;

fn all_pages(count: usize, page_size: usize) -> Vec<Vec<usize>> {
    let paginator = Paginator::new(page_size).expect("non-zero page size");
    let items: Vec<usize> = (0..count).collect();
    (1..=paginator.num_pages(count))
        .map(|number| {
            paginator
                .page(items.clone(), Some(&number.to_string()))
                .into_items()
        })
        .collect()
}

#[rstest]
fn concatenated_pages_reproduce_the_collection() {
    for page_size in 1..=7 {
        for count in 0..=30 {
            let pages = all_pages(count, page_size);
            let flattened: Vec<usize> = pages.iter().flatten().copied().collect();
            assert_eq!(
                flattened,
                (0..count).collect::<Vec<_>>(),
                "count={count} page_size={page_size}"
            );
            assert_eq!(pages.len(), count.div_ceil(page_size).max(1));
            assert!(pages.iter().all(|page| page.len() <= page_size));
        }
    }
}

#[rstest]
fn one_more_than_a_page_spills_onto_a_second_page() {
    let page_size = 10;
    let paginator = Paginator::new(page_size).expect("non-zero page size");
    let items: Vec<usize> = (0..=page_size).collect();

    let first = paginator.page(items.clone(), None);
    let second = paginator.page(items, Some("2"));

    assert_eq!(first.num_pages(), 2);
    assert_eq!(first.items().len(), page_size);
    assert_eq!(second.items(), &[page_size]);
    assert!(!second.has_next());
}

#[rstest]
#[case(Some("0"), 1)]
#[case(Some("-1"), 1)]
#[case(Some("x"), 1)]
#[case(Some(""), 1)]
#[case(None, 1)]
#[case(Some("1000"), 3)]
fn out_of_range_arguments_land_on_a_real_page(
    #[case] requested: Option<&str>,
    #[case] expected: usize,
) {
    let paginator = Paginator::new(4).expect("non-zero page size");
    let page = paginator.page((0..9).collect::<Vec<_>>(), requested);
    assert_eq!(page.number(), expected);
    assert!(!page.items().is_empty());
}
