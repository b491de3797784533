//! Default data seeding
//!
//! Populates an empty library with the default administrator, a handful of
//! member accounts and a starter catalog. Books are inserted through the
//! admin capability so the seed goes through the same gate as any caller.

use crate::{
    error::AppResult,
    library::Library,
    models::{Book, Role, User},
};

/// Seed the default catalog and accounts into a freshly constructed library
pub fn seed_library(library: &mut Library, public_base_url: &str) -> AppResult<()> {
    let admin = User::new(
        "AD01",
        "Super Admin",
        "admin@libria.com",
        "libria123",
        Role::Admin,
    )?;

    let cover = format!("{}/cover/cover-example.png", public_base_url);
    let pdf = format!("{}/pdf/pdf-example.pdf", public_base_url);

    let books = [
        ("9780132350884", "Clean Code", "Robert C. Martin", 2008, "Programming"),
        ("9780134685991", "Effective Java", "Joshua Bloch", 2018, "Programming"),
        ("9780201616224", "The Pragmatic Programmer", "Andrew Hunt", 1999, "Programming"),
        ("9781492078005", "Designing Data-Intensive Applications", "Martin Kleppmann", 2017, "Architecture"),
        ("9782070464090", "L'Étranger", "Albert Camus", 1942, "Roman"),
        ("9782253004226", "Le Petit Prince", "Antoine de Saint-Exupéry", 1943, "Conte"),
        ("9780553283686", "Dune", "Frank Herbert", 1965, "Science Fiction"),
        ("9780345339706", "The Hobbit", "J.R.R. Tolkien", 1937, "Fantasy"),
        ("9780553103540", "A Game of Thrones", "George R.R. Martin", 1996, "Fantasy"),
        ("9780451524935", "1984", "George Orwell", 1949, "Dystopie"),
        ("9780060850524", "Fahrenheit 451", "Ray Bradbury", 1953, "Dystopie"),
    ];

    for (isbn, title, author, year, genre) in books {
        let book = Book::new(
            isbn,
            title,
            author,
            year,
            Some(genre.to_string()),
            true,
            Some(cover.clone()),
            pdf.clone(),
        )?;
        admin.add_book_to_library(library, book)?;
    }

    let members = [
        ("MB01", "Zakaria Charouite", "zakaria@libria.com", "zack123"),
        ("MB02", "Ismael Benali", "ismael@libria.com", "ism123"),
        ("MB03", "Aurélie Dupont", "aurelie@libria.com", "aury123"),
        ("MB04", "Karen Lemoine", "karen@libria.com", "karen321"),
        ("MB05", "Julien Mercier", "julien@libria.com", "jmerc"),
    ];

    for (user_id, name, email, password) in members {
        library.register_user(User::new(user_id, name, email, password, Role::Member)?)?;
    }
    library.register_user(admin)?;

    tracing::info!(
        books = library.book_count(),
        users = library.user_count(),
        "Library seeded with default data"
    );
    Ok(())
}
