mod helpers;

mod client_tests {
    mod events;
    mod lifecycle;
    mod queries;
}
