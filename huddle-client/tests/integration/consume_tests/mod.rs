mod test_producer_added_after_active;
mod test_producer_remove_notifies_view;
mod test_remove_races_pending_consume;
