mod flow_cell;
