//! Text [`Table`] renderer.

use std::fmt::Write as _;

use common::pagination::{Order, Pagination};
use itertools::Itertools as _;

/// Column of a [`Table`] of `T` rows, optionally sortable by `S`.
#[derive(Clone, Copy, Debug)]
pub struct Column<T, S> {
    /// Title of this [`Column`].
    pub title: &'static str,

    /// Sort key of this [`Column`], if it's sortable.
    pub sort: Option<S>,

    /// Renders the cell of this [`Column`] in the provided row.
    pub cell: fn(&T) -> String,
}

/// Paginated and sortable text table.
#[derive(Debug)]
pub struct Table<'c, T, S> {
    /// [`Column`]s of this [`Table`].
    columns: &'c [Column<T, S>],

    /// Current sorting of this [`Table`], if any.
    sort: Option<(S, Order)>,
}

impl<'c, T, S: Copy + PartialEq> Table<'c, T, S> {
    /// Creates a new [`Table`] with the provided [`Column`]s.
    #[must_use]
    pub const fn new(columns: &'c [Column<T, S>]) -> Self {
        Self {
            columns,
            sort: None,
        }
    }

    /// Marks this [`Table`] as sorted by the provided key.
    #[must_use]
    pub fn sorted(mut self, sort: Option<(S, Order)>) -> Self {
        self.sort = sort;
        self
    }

    /// Renders the provided `rows` with the provided [`Pagination`] footer.
    #[must_use]
    pub fn render(
        &self,
        rows: &[T],
        pagination: Option<&Pagination>,
    ) -> String {
        let header = self
            .columns
            .iter()
            .map(|c| format!("{}{}", c.title, self.indicator(c)))
            .collect::<Vec<_>>();
        let cells = rows
            .iter()
            .map(|row| {
                self.columns.iter().map(|c| (c.cell)(row)).collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        let widths = header
            .iter()
            .enumerate()
            .map(|(i, title)| {
                cells
                    .iter()
                    .map(|r| r[i].chars().count())
                    .chain([title.chars().count()])
                    .max()
                    .unwrap_or_default()
            })
            .collect::<Vec<_>>();

        let mut out = String::new();
        line(&mut out, &header, &widths);
        _ = writeln!(
            out,
            "{}",
            widths.iter().map(|w| "-".repeat(*w)).join("-+-"),
        );
        if cells.is_empty() {
            out.push_str("No results\n");
        }
        for row in &cells {
            line(&mut out, row, &widths);
        }
        if let Some(p) = pagination {
            _ = writeln!(
                out,
                "Page {} of {} ({} total)",
                p.page_number(),
                p.total_pages().max(1),
                p.total_count(),
            );
        }
        out
    }

    /// Returns the sort indicator of the provided [`Column`].
    fn indicator(&self, column: &Column<T, S>) -> &'static str {
        match (column.sort, self.sort) {
            (Some(key), Some((sorted, order))) if key == sorted => match order {
                Order::Ascending => " ▲",
                Order::Descending => " ▼",
            },
            (Some(_), _) => " ·",
            (None, _) => "",
        }
    }
}

/// Writes a single padded line of `cells` into the provided `out`put.
fn line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(c, w)| format!("{c:<w$}"))
        .join(" | ");
    _ = writeln!(out, "{}", line.trim_end());
}

#[cfg(test)]
mod spec {
    use common::pagination::{Order, Pagination};

    use super::{Column, Table};

    struct Row {
        name: &'static str,
        count: u32,
    }

    const COLUMNS: &[Column<Row, u8>] = &[
        Column {
            title: "Name",
            sort: Some(0),
            cell: |r| r.name.to_owned(),
        },
        Column {
            title: "Count",
            sort: None,
            cell: |r| r.count.to_string(),
        },
    ];

    #[test]
    fn renders_rows_with_footer() {
        let rows = [
            Row {
                name: "Clinic",
                count: 3,
            },
            Row {
                name: "St. Mary Hospital",
                count: 12,
            },
        ];
        let pagination = Pagination::new(2, 2, 5).unwrap();

        let out = Table::new(COLUMNS)
            .sorted(Some((0, Order::Descending)))
            .render(&rows, Some(&pagination));

        assert_eq!(
            out,
            "Name ▼            | Count\n\
             ------------------+------\n\
             Clinic            | 3\n\
             St. Mary Hospital | 12\n\
             Page 2 of 3 (5 total)\n",
        );
    }

    #[test]
    fn renders_empty_table() {
        let out = Table::new(COLUMNS).render(&[], None);

        assert_eq!(
            out,
            "Name · | Count\n\
             -------+------\n\
             No results\n",
        );
    }
}
